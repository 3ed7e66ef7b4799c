pub mod qr_code_statuses;
