//! # Error Message Table
//!
//! Static lookup from HTTP status to user-facing text (Indonesian), a
//! category, a severity and the retry / contact-support affordances.
//!
//! Statuses without a dedicated entry fall back to the generic client (4xx)
//! or server (5xx) entry. "No response at all" is [`network_error`].

use std::fmt;

/// Where an error came from, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Network,
    Server,
    Client,
    Auth,
    Validation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Validation => "validation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Everything needed to present an error to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// HTTP status the entry was looked up by (`None` for local errors and
    /// transport failures)
    pub status: Option<u16>,
    pub category: ErrorCategory,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// Per-field messages of a validation failure
    pub details: Vec<String>,
    pub can_retry: bool,
    pub contact_support: bool,
}

impl ErrorInfo {
    fn entry(
        status: Option<u16>,
        category: ErrorCategory,
        severity: Severity,
        title: &str,
        message: &str,
        can_retry: bool,
        contact_support: bool,
    ) -> Self {
        Self {
            status,
            category,
            severity,
            title: title.to_string(),
            message: message.to_string(),
            details: Vec::new(),
            can_retry,
            contact_support,
        }
    }

    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub(crate) fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

/// Statuses with a dedicated entry in the table.
pub const KNOWN_STATUSES: [u16; 13] = [400, 401, 403, 404, 408, 409, 413, 422, 429, 500, 502, 503, 504];

/// The request never reached the server or no response came back.
pub fn network_error() -> ErrorInfo {
    ErrorInfo::entry(
        None,
        ErrorCategory::Network,
        Severity::Critical,
        "Koneksi Terputus",
        "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.",
        true,
        false,
    )
}

/// Look up the presentation for an HTTP status.
pub fn error_info_for_status(status: u16) -> ErrorInfo {
    use ErrorCategory::*;
    use Severity::*;

    let s = Some(status);
    match status {
        400 => ErrorInfo::entry(
            s,
            Client,
            Low,
            "Permintaan Tidak Valid",
            "Permintaan tidak dapat diproses. Periksa kembali data yang Anda masukkan.",
            false,
            false,
        ),
        401 => ErrorInfo::entry(
            s,
            Auth,
            Medium,
            "Sesi Berakhir",
            "Sesi Anda telah berakhir. Silakan masuk kembali.",
            false,
            false,
        ),
        403 => ErrorInfo::entry(
            s,
            Auth,
            Medium,
            "Akses Ditolak",
            "Anda tidak memiliki izin untuk mengakses fitur ini.",
            false,
            true,
        ),
        404 => ErrorInfo::entry(
            s,
            Client,
            Low,
            "Data Tidak Ditemukan",
            "Data yang Anda cari tidak ditemukan atau sudah dihapus.",
            false,
            false,
        ),
        408 => ErrorInfo::entry(
            s,
            Network,
            Medium,
            "Waktu Habis",
            "Permintaan memakan waktu terlalu lama. Silakan coba lagi.",
            true,
            false,
        ),
        409 => ErrorInfo::entry(
            s,
            Client,
            Low,
            "Data Bentrok",
            "Data sudah ada atau telah diubah oleh pengguna lain.",
            false,
            false,
        ),
        413 => ErrorInfo::entry(
            s,
            Client,
            Low,
            "Data Terlalu Besar",
            "Ukuran data melebihi batas yang diizinkan.",
            false,
            false,
        ),
        422 => ErrorInfo::entry(
            s,
            Validation,
            Low,
            "Data Tidak Valid",
            "Beberapa data tidak valid. Periksa kembali isian Anda.",
            false,
            false,
        ),
        429 => ErrorInfo::entry(
            s,
            Client,
            Medium,
            "Terlalu Banyak Permintaan",
            "Terlalu banyak permintaan. Tunggu sebentar lalu coba lagi.",
            true,
            false,
        ),
        500 => ErrorInfo::entry(
            s,
            Server,
            High,
            "Kesalahan Server",
            "Terjadi kesalahan pada server. Silakan coba beberapa saat lagi.",
            true,
            true,
        ),
        502 => ErrorInfo::entry(
            s,
            Server,
            High,
            "Server Tidak Terjangkau",
            "Server sedang tidak dapat dijangkau. Silakan coba beberapa saat lagi.",
            true,
            true,
        ),
        503 => ErrorInfo::entry(
            s,
            Server,
            Critical,
            "Layanan Tidak Tersedia",
            "Layanan sedang dalam pemeliharaan atau tidak tersedia untuk sementara.",
            true,
            true,
        ),
        504 => ErrorInfo::entry(
            s,
            Server,
            High,
            "Server Tidak Merespons",
            "Server tidak merespons tepat waktu. Silakan coba lagi.",
            true,
            true,
        ),
        400..=499 => ErrorInfo::entry(
            s,
            Client,
            Low,
            "Kesalahan Permintaan",
            "Terjadi kesalahan pada permintaan Anda.",
            false,
            false,
        ),
        500..=599 => ErrorInfo::entry(
            s,
            Server,
            High,
            "Kesalahan Server",
            "Terjadi kesalahan pada server. Silakan coba beberapa saat lagi.",
            true,
            true,
        ),
        0 => network_error(),
        _ => ErrorInfo::entry(
            s,
            Client,
            Medium,
            "Terjadi Kesalahan",
            "Terjadi kesalahan yang tidak terduga. Silakan coba lagi.",
            true,
            false,
        ),
    }
}
