pub mod enums;
pub mod qr_code_validation;
pub mod qr_codes;
