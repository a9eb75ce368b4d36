//! Command handlers. Each one talks to the backend through the library's view
//! models and prints its result; errors bubble up to `main` for reporting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use chrono::Local;
use ipl_client::app::{parse_callback, PaymentFilter, SortOrder, UserFilter, UserSort};
use ipl_client::feedback::FeedbackCenter;
use ipl_client::services::api::FeeQuery;
use ipl_client::{
    ApiClient, ApiService, ClientConfig, FeesView, NotificationCenter, PaymentOutcome, PaymentWatcher,
    PaymentsReview, PeriodReport, Result, UserDirectory, WatchResult,
};
use shared::utils::{format_date, format_rupiah};
use shared::{CreateUserRequest, GenerateFeesRequest, Payment};

use super::render;
use super::{AdminCommand, Command, NotificationsArgs, PaymentCommand, PaymentsArgs};

/// Everything a command needs.
pub struct Context {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub api: Arc<dyn ApiService>,
    pub feedback: FeedbackCenter,
}

impl Context {
    pub fn new(config: ClientConfig, client: ApiClient) -> Self {
        let api: Arc<dyn ApiService> = Arc::new(client.clone());
        Self {
            config,
            client,
            api,
            feedback: FeedbackCenter::default(),
        }
    }
}

/// Whether `command` needs a logged-in user before it runs.
fn requires_login(command: &Command) -> bool {
    !matches!(command, Command::Login { .. } | Command::Logout)
}

pub async fn run(ctx: &mut Context, command: Command) -> Result<()> {
    if requires_login(&command) {
        ctx.client.session().require_user()?;
    }

    match command {
        Command::Login { email, password } => login(ctx, email, password).await,
        Command::Logout => logout(ctx).await,
        Command::Whoami => whoami(ctx).await,
        Command::Fees { status, year } => fees(ctx, FeeQuery { status, year }).await,
        Command::Pay { fee_id, open, wait } => pay(ctx, &fee_id, open, wait).await,
        Command::Payment { command } => payment(ctx, command).await,
        Command::Payments(args) => payments(ctx, args).await,
        Command::Admin { command } => admin(ctx, command).await,
        Command::Notifications(args) => notifications(ctx, args).await,
    }
}

async fn login(ctx: &mut Context, email: String, password: String) -> Result<()> {
    let auth = ctx.api.login(email, password).await?;
    ctx.feedback
        .success("Berhasil Masuk", format!("Selamat datang, {}.", auth.user.name));
    println!("{}", render::user(&auth.user));
    Ok(())
}

async fn logout(ctx: &mut Context) -> Result<()> {
    if !ctx.client.session().is_authenticated() {
        ctx.feedback.info("Sudah Keluar", "Tidak ada sesi aktif.");
        return Ok(());
    }
    ctx.api.logout().await?;
    ctx.feedback.success("Berhasil Keluar", "Sesi telah dihapus.");
    Ok(())
}

async fn whoami(ctx: &mut Context) -> Result<()> {
    let user = ctx.api.me().await?;
    println!("{}", render::user(&user));
    Ok(())
}

async fn fees(ctx: &mut Context, query: FeeQuery) -> Result<()> {
    let view = FeesView::new(Arc::clone(&ctx.api));
    view.set_query(query);
    view.refresh().await?;

    let today = Local::now().date_naive();
    println!("{}", render::fees(&view.visible(), today));
    println!("\nTotal tunggakan: {}", format_rupiah(view.outstanding_total()));
    if let Some(next) = view.next_due(today) {
        println!(
            "Jatuh tempo berikutnya: {} ({})",
            format_date(next.due_date),
            format_rupiah(next.amount)
        );
    }
    Ok(())
}

async fn pay(ctx: &mut Context, fee_id: &str, open: bool, wait: bool) -> Result<()> {
    let session = ctx.api.create_payment(fee_id).await?;
    println!("Pembayaran {} dibuat (order {}).", session.payment_id, session.order_id);
    println!("Lanjutkan pembayaran di: {}", session.redirect_url);

    if open {
        if let Err(e) = open::that(&session.redirect_url) {
            tracing::warn!(error = %e, "Failed to open browser");
            ctx.feedback
                .info("Browser Tidak Terbuka", "Buka tautan di atas secara manual.");
        }
    }

    if wait {
        watch(ctx, &session.payment_id).await?;
    }
    Ok(())
}

async fn payment(ctx: &mut Context, command: PaymentCommand) -> Result<()> {
    let watcher = PaymentWatcher::from_config(Arc::clone(&ctx.api), &ctx.config);

    match command {
        PaymentCommand::Status { payment_id, wait, force } => {
            let payment = if force {
                watcher.force_check(&payment_id).await?
            } else {
                watcher.check(&payment_id).await?
            };
            println!("{}", render::payment(&payment));

            if wait && !PaymentOutcome::of(&payment).is_terminal() {
                watch(ctx, &payment_id).await?;
            }
            Ok(())
        }
        PaymentCommand::Callback { query } => {
            let callback = parse_callback(&query)?;
            let resolution = watcher.resolve_callback(&callback).await?;

            println!("Hasil   : {}", resolution.outcome.label());
            println!("Halaman : {}", resolution.destination().path());
            if let Some(fee_id) = &resolution.fee_id {
                println!("Iuran   : {}", fee_id);
            }
            if let Some(payment) = &resolution.payment {
                println!("\n{}", render::payment(payment));
            }
            Ok(())
        }
    }
}

/// Poll a payment until it settles, printing each status change.
async fn watch(ctx: &mut Context, payment_id: &str) -> Result<()> {
    let watcher = PaymentWatcher::from_config(Arc::clone(&ctx.api), &ctx.config);
    eprintln!("Menunggu konfirmasi pembayaran...");

    let mut last_status = None;
    let result = watcher
        .watch_with(payment_id, |payment: &Payment| {
            if last_status != Some(payment.status) {
                eprintln!("  status: {}", payment.status);
                last_status = Some(payment.status);
            }
        })
        .await?;

    match result {
        WatchResult::Settled(payment) => {
            println!("{}", render::payment(&payment));
            let outcome = PaymentOutcome::of(&payment);
            if outcome == PaymentOutcome::Success {
                ctx.feedback.success("Pembayaran Berhasil", "Terima kasih, iuran telah lunas.");
            } else {
                ctx.feedback.info("Pembayaran Selesai", outcome.label());
            }
        }
        WatchResult::StillPending(payment) => {
            println!("{}", render::payment(&payment));
            ctx.feedback.info(
                "Masih Menunggu",
                format!("Cek lagi nanti dengan `ipl payment status {}`.", payment.id),
            );
        }
    }
    Ok(())
}

async fn payments(ctx: &mut Context, args: PaymentsArgs) -> Result<()> {
    let review = PaymentsReview::new(Arc::clone(&ctx.api));
    review.set_filter(PaymentFilter {
        outcomes: args.statuses.into_iter().collect(),
        from: args.from,
        to: args.to,
        search: args.search,
        fee_id: args.fee_id,
    });
    let order = if args.desc { SortOrder::Desc } else { SortOrder::Asc };
    review.set_sort(args.sort, order);
    review.refresh().await?;

    print_review(&review);

    if let Some(path) = &args.export {
        let mut writer = BufWriter::new(File::create(path)?);
        let rows = review.export_csv(&mut writer)?;
        writer.flush()?;
        ctx.feedback
            .success("Ekspor Selesai", format!("{} baris ditulis ke {}", rows, path.display()));
    }

    if args.follow {
        let _refresh = review.spawn_auto_refresh(ctx.config.refresh_interval);
        let mut ticker = tokio::time::interval(ctx.config.refresh_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = ticker.tick() => {
                    println!();
                    print_review(&review);
                }
            }
        }
    }
    Ok(())
}

fn print_review(review: &PaymentsReview) {
    println!("{}", render::payments(&review.visible()));

    let totals = review.totals();
    if !totals.is_empty() {
        println!();
        for (outcome, total) in totals {
            println!(
                "{:<22} {:>4} transaksi  {:>16}",
                outcome.label(),
                total.count,
                format_rupiah(total.amount)
            );
        }
    }
}

async fn admin(ctx: &mut Context, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Generate {
            month,
            year,
            amount,
            due_date,
            description,
        } => {
            let request = GenerateFeesRequest {
                month,
                year,
                amount,
                due_date,
                description,
            };
            let result = ctx.api.generate_fees(&request).await?;
            ctx.feedback.success(
                "Iuran Dibuat",
                format!("{} iuran dibuat, {} dilewati.", result.created, result.skipped),
            );
            Ok(())
        }
        AdminCommand::Summary { month, year } => {
            let report = PeriodReport::load(ctx.api.as_ref(), month, year).await?;
            println!("{}", render::summary(&report.summary, &report.paid, &report.unpaid));
            Ok(())
        }
        AdminCommand::Users { role, search, by_house } => {
            let directory = UserDirectory::new(Arc::clone(&ctx.api));
            directory.set_filter(UserFilter { role, search });
            let sort = if by_house { UserSort::HouseNumber } else { UserSort::Name };
            directory.set_sort(sort, SortOrder::Asc);
            directory.refresh().await?;
            println!("{}", render::users(&directory.visible()));
            Ok(())
        }
        AdminCommand::CreateUser {
            name,
            email,
            password,
            role,
            house_number,
            phone,
        } => {
            let request = CreateUserRequest {
                name,
                email,
                password,
                role,
                house_number,
                phone,
            };
            let user = ctx.api.create_user(&request).await?;
            ctx.feedback.success("Pengguna Dibuat", format!("{} ({})", user.name, user.id));
            Ok(())
        }
        AdminCommand::DeleteUser { user_id } => {
            ctx.api.delete_user(&user_id).await?;
            ctx.feedback.success("Pengguna Dihapus", user_id);
            Ok(())
        }
    }
}

async fn notifications(ctx: &mut Context, args: NotificationsArgs) -> Result<()> {
    let center = NotificationCenter::new(Arc::clone(&ctx.api));
    center.refresh().await?;

    if let Some(id) = &args.mark_read {
        center.mark_read(id).await?;
    }
    if args.mark_all {
        center.mark_all_read().await?;
    }
    if let Some(id) = &args.delete {
        center.delete(id).await?;
    }

    print_notifications(&center, args.unread);

    if args.follow {
        let _polling = center.spawn_polling(ctx.config.refresh_interval);
        let mut ticker = tokio::time::interval(ctx.config.refresh_interval);
        ticker.tick().await;
        let mut last_unread = center.unread_count();
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = ticker.tick() => {
                    let unread = center.unread_count();
                    if unread != last_unread {
                        println!();
                        print_notifications(&center, args.unread);
                        last_unread = unread;
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_notifications(center: &NotificationCenter, unread_only: bool) {
    let items = if unread_only { center.unread() } else { center.list() };
    println!("{}", render::notifications(&items, center.unread_count()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Args;

    fn parse(args: &[&str]) -> Command {
        Args::parse_from(std::iter::once("ipl").chain(args.iter().copied())).command
    }

    #[test]
    fn test_login_and_logout_run_without_session() {
        assert!(!requires_login(&parse(&["login", "--email", "a@b.id", "--password", "rahasia123"])));
        assert!(!requires_login(&parse(&["logout"])));
        assert!(requires_login(&parse(&["whoami"])));
        assert!(requires_login(&parse(&["payments"])));
    }
}
