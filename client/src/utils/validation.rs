//! Validation utilities for user input
//!
//! Messages are user-facing and in Indonesian, like the rest of the
//! feedback text.

use chrono::NaiveDate;
use shared::{CreateUserRequest, GenerateFeesRequest};

use crate::core::error::{AppError, Result};

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into a `Result`, failing with [`AppError::Validation`].
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::err("Email wajib diisi");
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return ValidationResult::err("Format email tidak valid");
    }

    if parts[0].is_empty() {
        return ValidationResult::err("Format email tidak valid");
    }

    if parts[1].is_empty() || !parts[1].contains('.') || parts[1].ends_with('.') {
        return ValidationResult::err("Domain email tidak valid");
    }

    ValidationResult::ok()
}

/// Validate password length
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Kata sandi wajib diisi");
    }

    if password.chars().count() < 8 {
        return ValidationResult::err("Kata sandi minimal 8 karakter");
    }

    ValidationResult::ok()
}

/// Login form: valid email, non-empty password.
///
/// Password length is not checked here so old accounts with short
/// passwords can still log in.
pub fn validate_login(email: &str, password: &str) -> Result<()> {
    validate_email(email.trim()).into_result()?;
    if password.is_empty() {
        return Err(AppError::Validation("Kata sandi wajib diisi".to_string()));
    }
    Ok(())
}

/// Fee generation form.
///
/// The due date may not fall before the first day of the billed month.
pub fn validate_generate_fees(request: &GenerateFeesRequest) -> Result<()> {
    if !(1..=12).contains(&request.month) {
        return Err(AppError::Validation("Bulan harus antara 1 dan 12".to_string()));
    }

    if !(2000..=2100).contains(&request.year) {
        return Err(AppError::Validation("Tahun harus antara 2000 dan 2100".to_string()));
    }

    if request.amount <= 0 {
        return Err(AppError::Validation("Nominal iuran harus lebih dari 0".to_string()));
    }

    let period_start = NaiveDate::from_ymd_opt(request.year, request.month, 1)
        .ok_or_else(|| AppError::Validation("Periode tidak valid".to_string()))?;
    if request.due_date < period_start {
        return Err(AppError::Validation(format!(
            "Jatuh tempo tidak boleh sebelum {}",
            shared::format_date(period_start)
        )));
    }

    if request
        .description
        .as_deref()
        .is_some_and(|d| d.chars().count() > 255)
    {
        return Err(AppError::Validation("Keterangan maksimal 255 karakter".to_string()));
    }

    Ok(())
}

/// Admin "create user" form.
pub fn validate_new_user(request: &CreateUserRequest) -> Result<()> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Nama wajib diisi".to_string()));
    }
    validate_email(request.email.trim()).into_result()?;
    validate_password(&request.password).into_result()?;
    Ok(())
}
