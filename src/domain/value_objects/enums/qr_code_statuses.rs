use std::fmt::Display;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum QrCodeStatus {
    #[default]
    Open,
}

impl Display for QrCodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let qr_code_status = match self {
            QrCodeStatus::Open => "OPEN",
        };
        write!(f, "{}", qr_code_status)
    }
}

impl QrCodeStatus {
    /// Blank or absent statuses fall back to `OPEN`; anything else is kept verbatim.
    pub fn resolve(status: Option<String>) -> String {
        match status {
            Some(status) if !status.trim().is_empty() => status,
            _ => QrCodeStatus::Open.to_string(),
        }
    }
}
