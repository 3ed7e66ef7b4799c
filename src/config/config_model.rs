use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub qr_code: QrCode,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// MiB
    pub body_limit: u64,
    /// Seconds
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct QrCode {
    pub output_dir: PathBuf,
}
