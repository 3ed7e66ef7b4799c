pub mod qr_code_images;
