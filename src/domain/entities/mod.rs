pub mod qr_codes;
