//! Plain-text output for the CLI. Data goes to stdout, feedback to stderr.

use std::fmt::Write as _;

use chrono::NaiveDate;
use ipl_client::app::fees::is_overdue;
use ipl_client::feedback::{ErrorInfo, FeedbackCenter, Toast, ToastLevel};
use ipl_client::PaymentOutcome;
use shared::utils::{format_date, format_rupiah, period_label};
use shared::{Fee, Notification, PaidUser, Payment, PaymentSummary, UnpaidUser, User};

/// Width of the banner frame.
const FRAME_WIDTH: usize = 60;

pub fn toast_line(toast: &Toast) -> String {
    let marker = match toast.level {
        ToastLevel::Success => "✓",
        ToastLevel::Info => "i",
        ToastLevel::Error => "✗",
    };
    let mut line = format!("{} {}: {}", marker, toast.title, toast.message);
    for detail in &toast.details {
        let _ = write!(line, "\n    - {}", detail);
    }
    line
}

pub fn banner_block(info: &ErrorInfo) -> String {
    let rule = "═".repeat(FRAME_WIDTH);
    let mut block = format!("╔{}\n║ {}\n║\n║ {}\n", rule, info.title.to_uppercase(), info.message);
    for detail in &info.details {
        let _ = writeln!(block, "║   - {}", detail);
    }
    if info.can_retry || info.contact_support {
        block.push_str("║\n");
    }
    if info.can_retry {
        block.push_str("║ Silakan coba lagi beberapa saat lagi.\n");
    }
    if info.contact_support {
        block.push_str("║ Jika masalah berlanjut, hubungi pengurus.\n");
    }
    if let Some(status) = info.status {
        let _ = writeln!(block, "║ (kode {})", status);
    }
    block.push_str(&format!("╚{}", rule));
    block
}

/// Print queued toasts and the banner, if any, to stderr.
pub fn flush_feedback(feedback: &mut FeedbackCenter) {
    for toast in feedback.drain_toasts() {
        eprintln!("{}", toast_line(&toast));
    }
    if let Some(banner) = feedback.dismiss_banner() {
        eprintln!("{}", banner_block(&banner));
    }
}

pub fn user(user: &User) -> String {
    let mut out = format!("{} <{}>\nRole   : {}\n", user.name, user.email, user.role);
    if let Some(house) = &user.house_number {
        let _ = writeln!(out, "Rumah  : {}", house);
    }
    if let Some(phone) = &user.phone {
        let _ = writeln!(out, "Telepon: {}", phone);
    }
    let _ = write!(out, "ID     : {}", user.id);
    out
}

pub fn fees(fees: &[Fee], today: NaiveDate) -> String {
    if fees.is_empty() {
        return "Tidak ada iuran.".to_string();
    }
    let mut out = format!("{:<38} {:<16} {:>14} {:<18} {}\n", "ID", "PERIODE", "NOMINAL", "JATUH TEMPO", "STATUS");
    for fee in fees {
        let late = if is_overdue(fee, today) { " (terlambat)" } else { "" };
        let _ = writeln!(
            out,
            "{:<38} {:<16} {:>14} {:<18} {}{}",
            fee.id,
            period_label(fee.month, fee.year),
            format_rupiah(fee.amount),
            format_date(fee.due_date),
            fee.status,
            late
        );
    }
    out.pop();
    out
}

pub fn payment(payment: &Payment) -> String {
    let outcome = PaymentOutcome::of(payment);
    let mut out = format!(
        "Pembayaran {}\nStatus : {} ({})\nNominal: {}\nIuran  : {}\n",
        payment.id,
        outcome.label(),
        payment.status,
        format_rupiah(payment.amount),
        payment.fee_id
    );
    if let Some(order_id) = &payment.order_id {
        let _ = writeln!(out, "Order  : {}", order_id);
    }
    if let Some(method) = &payment.payment_method {
        let _ = writeln!(out, "Metode : {}", method);
    }
    if let Some(paid_at) = payment.paid_at {
        let _ = writeln!(out, "Dibayar: {}", paid_at.format("%Y-%m-%d %H:%M"));
    }
    let _ = write!(out, "Dibuat : {}", payment.created_at.format("%Y-%m-%d %H:%M"));
    out
}

pub fn payments(payments: &[Payment]) -> String {
    if payments.is_empty() {
        return "Tidak ada pembayaran.".to_string();
    }
    let mut out = format!(
        "{:<38} {:<20} {:>14} {:<10} {}\n",
        "ID", "WARGA", "NOMINAL", "STATUS", "DIBUAT"
    );
    for payment in payments {
        let _ = writeln!(
            out,
            "{:<38} {:<20} {:>14} {:<10} {}",
            payment.id,
            truncate(payment.user_name.as_deref().unwrap_or("-"), 20),
            format_rupiah(payment.amount),
            PaymentOutcome::of(payment).as_str(),
            payment.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    out.pop();
    out
}

pub fn summary(summary: &PaymentSummary, paid: &[PaidUser], unpaid: &[UnpaidUser]) -> String {
    let mut out = format!(
        "Rekap {}\nTerkumpul    : {} ({} warga)\nBelum dibayar: {} ({} warga)\nTingkat bayar: {:.1}%\n",
        period_label(summary.month, summary.year),
        format_rupiah(summary.total_paid),
        summary.paid_count,
        format_rupiah(summary.total_unpaid),
        summary.unpaid_count,
        summary.collection_rate()
    );

    if !paid.is_empty() {
        out.push_str("\nSudah bayar:\n");
        for user in paid {
            let _ = writeln!(
                out,
                "  {:<8} {:<24} {:>14}  {}",
                user.house_number.as_deref().unwrap_or("-"),
                truncate(&user.name, 24),
                format_rupiah(user.amount),
                user.paid_at.format("%Y-%m-%d")
            );
        }
    }
    if !unpaid.is_empty() {
        out.push_str("\nBelum bayar:\n");
        for user in unpaid {
            let _ = writeln!(
                out,
                "  {:<8} {:<24} {:>14}  jatuh tempo {}",
                user.house_number.as_deref().unwrap_or("-"),
                truncate(&user.name, 24),
                format_rupiah(user.amount),
                format_date(user.due_date)
            );
        }
    }
    out.pop();
    out
}

pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return "Tidak ada pengguna.".to_string();
    }
    let mut out = format!("{:<38} {:<24} {:<30} {:<9} {}\n", "ID", "NAMA", "EMAIL", "ROLE", "RUMAH");
    for user in users {
        let _ = writeln!(
            out,
            "{:<38} {:<24} {:<30} {:<9} {}",
            user.id,
            truncate(&user.name, 24),
            truncate(&user.email, 30),
            user.role.as_str(),
            user.house_number.as_deref().unwrap_or("-")
        );
    }
    out.pop();
    out
}

pub fn notifications(notifications: &[Notification], unread_count: usize) -> String {
    let mut out = format!("{} notifikasi belum dibaca\n", unread_count);
    for notification in notifications {
        let marker = if notification.is_read { " " } else { "•" };
        let _ = writeln!(
            out,
            "{} [{}] {} - {}\n    {}",
            marker,
            notification.id,
            notification.created_at.format("%Y-%m-%d %H:%M"),
            notification.title,
            notification.message
        );
    }
    out.pop();
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipl_client::feedback::error_info_for_status;

    #[test]
    fn test_toast_line_lists_details() {
        let toast = Toast {
            level: ToastLevel::Error,
            title: "Data Tidak Valid".to_string(),
            message: "Periksa kembali isian Anda.".to_string(),
            details: vec!["Nominal wajib diisi".to_string()],
        };
        assert_eq!(
            toast_line(&toast),
            "✗ Data Tidak Valid: Periksa kembali isian Anda.\n    - Nominal wajib diisi"
        );
    }

    #[test]
    fn test_banner_block_shows_hints_and_status() {
        let block = banner_block(&error_info_for_status(503));
        assert!(block.starts_with('╔'));
        assert!(block.ends_with(&"═".repeat(FRAME_WIDTH)));
        assert!(block.contains("coba lagi"));
        assert!(block.contains("(kode 503)"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Budi", 10), "Budi");
        assert_eq!(truncate("Ñoño Santoso", 5), "Ñoño…");
    }
}
