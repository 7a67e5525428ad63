use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use cmw_application::prelude as flows;
use cmw_core::{
    entities::*,
    gateways::geolocation::GeoLocationGateway as _,
    usecases::{self, IncidentFilter, NewApproval, NewReport, ReportDraft},
};
use cmw_db_sqlite::Connections;

use crate::{config::Config, gateways, image};

#[derive(Debug, Parser)]
#[command(name = "mangrove-watch", version, about = "Report incidents that harm mangroves")]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database, overrides the configuration
    #[arg(long, value_name = "DATABASE_URL")]
    pub db_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit an incident report and earn points
    Report {
        #[command(flatten)]
        incident: IncidentArgs,

        /// Image of the incident
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Role of the reporter
        #[arg(long, default_value = "Community")]
        role: Role,
    },
    /// Submit an incident report for approval by an administrator
    SubmitForApproval {
        #[command(flatten)]
        incident: IncidentArgs,

        /// Image of the incident
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Recipient of the email after approval
        #[arg(long, value_name = "EMAIL", default_value = "")]
        to: String,

        /// Follow the status until the report has been reviewed
        #[arg(long)]
        watch: bool,
    },
    /// List all pending approvals
    Pending {
        /// Keep listing the pending approvals whenever they change
        #[arg(long)]
        watch: bool,
    },
    /// Approve a pending report and compose the prepared email
    Approve { id: String },
    /// Reject a pending report
    Reject { id: String },
    /// Show the status of a report that has been submitted for approval
    Status {
        id: String,

        /// Follow the status until the report has been reviewed
        #[arg(long)]
        watch: bool,
    },
    /// List the most recent reports
    Reports {
        /// Maximum number of reports
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the incident markers of the map
    Map {
        /// "All" or an incident type
        #[arg(long, default_value = "All")]
        filter: IncidentFilter,
    },
    /// Show points, role, badge and contribution history
    Profile,
    /// Show the top contributors
    Leaderboard,
    /// Print an email template for reporting an incident directly
    EmailTemplate {
        #[command(flatten)]
        incident: IncidentArgs,

        /// Print a `mailto:` URL for this recipient instead
        #[arg(long, value_name = "EMAIL")]
        mailto: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct IncidentArgs {
    /// Incident type, e.g. "Cutting" or "Oil Spill"
    #[arg(value_name = "TYPE")]
    pub incident_type: IncidentType,

    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Don't look up the current position
    #[arg(long)]
    pub no_locate: bool,

    /// What happened
    #[arg(short, long)]
    pub description: Option<String>,
}

impl IncidentArgs {
    fn explicit_position(&self) -> Result<Option<MapPoint>> {
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Ok(None);
        };
        let pos = MapPoint::from_lat_lng_deg(lat, lng);
        if !pos.is_valid() {
            bail!("Invalid position ({pos})");
        }
        Ok(Some(pos))
    }
}

struct Context {
    cfg: Config,
}

impl Context {
    fn connect(&self) -> Result<Connections> {
        let db = &self.cfg.db;
        log::info!(
            "Connecting to SQLite database '{}' (pool size = {})",
            db.conn_sqlite,
            db.conn_pool_size
        );
        let connections = Connections::init(&db.conn_sqlite, db.conn_pool_size.into())?;
        cmw_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;
        Ok(connections)
    }

    /// Commits of other processes, e.g. an administrator reviewing
    /// reports in another terminal, are published to the
    /// subscribers of `connections`.
    fn monitor_store_changes(&self, connections: &Connections) -> tokio::task::JoinHandle<()> {
        tokio::spawn(flows::watch_store_changes(
            connections.clone(),
            self.cfg.status.change_check_interval,
        ))
    }

    async fn current_position(&self) -> Result<Option<MapPoint>> {
        let gw = gateways::geolocation_gateway(&self.cfg.geolocation.gateway);
        let request = self.cfg.geolocation.request;
        // The lookup might block until the timeout expires
        let pos = tokio::task::spawn_blocking(move || gw.current_position(&request)).await?;
        Ok(pos)
    }

    async fn position(&self, args: &IncidentArgs, fallback: bool) -> Result<Option<MapPoint>> {
        if let Some(pos) = args.explicit_position()? {
            return Ok(Some(pos));
        }
        if args.no_locate {
            return Ok(None);
        }
        if fallback {
            let gw = gateways::geolocation_gateway(&self.cfg.geolocation.gateway);
            let request = self.cfg.geolocation.request;
            let pos = tokio::task::spawn_blocking(move || {
                usecases::locate_or_fallback(gw.as_ref(), &request)
            })
            .await?;
            return Ok(Some(pos));
        }
        self.current_position().await
    }

    async fn draft(
        &self,
        args: IncidentArgs,
        image: Option<PathBuf>,
    ) -> Result<ReportDraft> {
        let pos = self.position(&args, true).await?;
        let image_url = image
            .map(|path| image::load_data_url(&path))
            .transpose()?;
        Ok(ReportDraft {
            pos,
            description: args.description,
            image_url,
            ..ReportDraft::new(args.incident_type)
        })
    }
}

pub async fn run(cli: Cli, cfg: Config) -> Result<()> {
    let ctx = Context { cfg };
    match cli.command {
        Command::Report {
            incident,
            image,
            role,
        } => {
            let draft = ctx.draft(incident, image).await?;
            let connections = ctx.connect()?;
            let submitted = flows::submit_report(
                &connections,
                NewReport {
                    draft,
                    role,
                    points: ctx.cfg.reports.points_per_report,
                },
            )?;
            println!(
                "Report {} submitted: you now have {} points",
                submitted.id, submitted.points
            );
        }
        Command::SubmitForApproval {
            incident,
            image,
            to,
            watch,
        } => {
            let draft = ctx.draft(incident, image).await?;
            let email = usecases::prepare_email(&draft);
            let connections = ctx.connect()?;
            let approval = flows::submit_for_approval(
                &connections,
                NewApproval {
                    draft,
                    recipient_email: to,
                    email,
                },
            )?;
            println!("Report {} submitted for approval", approval.id);
            if watch {
                watch_status(&ctx, &connections, approval.id.as_str()).await?;
            }
        }
        Command::Pending { watch } => {
            let connections = ctx.connect()?;
            if watch {
                let monitor = ctx.monitor_store_changes(&connections);
                let result = flows::watch_pending_approvals(
                    &connections,
                    ctx.cfg.status.poll_interval,
                    print_pending,
                )
                .await;
                monitor.abort();
                result?;
            } else {
                let pending = flows::load_approvals(&connections, ApprovalStatus::Pending)?;
                print_pending(&pending);
            }
        }
        Command::Approve { id } => {
            let connections = ctx.connect()?;
            let compose_gw = gateways::compose_gateway(&ctx.cfg.compose.gateway)?;
            match flows::approve(&connections, compose_gw.as_ref(), &id)? {
                Some(approval) => {
                    println!("Approved {id}");
                    println!("{}", ComposeRequest::from(&approval).mailto_url());
                }
                None => println!("No pending report {id}"),
            }
        }
        Command::Reject { id } => {
            let connections = ctx.connect()?;
            match flows::reject(&connections, &id)? {
                Some(_) => println!("Rejected {id}"),
                None => println!("No pending report {id}"),
            }
        }
        Command::Status { id, watch } => {
            let connections = ctx.connect()?;
            if watch {
                watch_status(&ctx, &connections, &id).await?;
            } else {
                print_status(&id, flows::approval_status(&connections, &id)?);
            }
        }
        Command::Reports { limit } => {
            let connections = ctx.connect()?;
            let mut reports = flows::load_reports(&connections)?;
            if let Some(limit) = limit {
                reports.truncate(limit);
            }
            if reports.is_empty() {
                println!("No reports yet");
            }
            for report in reports {
                print_report(&report);
            }
        }
        Command::Map { filter } => {
            let connections = ctx.connect()?;
            let markers = flows::map_markers(&connections, &ctx.cfg.map.sample_incidents, filter)?;
            for marker in &markers {
                println!(
                    "[{}] {} {} ({}) {}",
                    marker.style.abbr, marker.style.color, marker.id, marker.pos, marker.popup
                );
            }
            match usecases::markers_bbox(&markers) {
                Some((sw, ne)) => println!("{} marker(s) within ({sw}) - ({ne})", markers.len()),
                None => println!("No markers, centered at ({})", MapPoint::FALLBACK),
            }
        }
        Command::Profile => {
            let connections = ctx.connect()?;
            let profile = flows::profile(&connections)?;
            println!("Role:   {}", profile.role);
            println!("Points: {}", profile.points);
            println!("Badge:  {}", profile.badge);
            if profile.recent_reports.is_empty() {
                println!("No reports yet. Submit an incident to earn points.");
            }
            for report in &profile.recent_reports {
                println!(
                    "{}  {}  {:.2}, {:.2}",
                    report.created_at, report.incident_type, report.lat, report.lng
                );
            }
        }
        Command::Leaderboard => {
            let connections = ctx.connect()?;
            let entries = flows::leaderboard(&connections, &ctx.cfg.leaderboard.contributors)?;
            for entry in entries {
                let prize = entry
                    .prize()
                    .map(|prize| format!("  {prize}"))
                    .unwrap_or_default();
                println!(
                    "{:>2}. {:<10} {:>5} pts  {}{prize}",
                    entry.rank, entry.name, entry.points, entry.badge
                );
            }
        }
        Command::EmailTemplate { incident, mailto } => {
            let pos = ctx.position(&incident, false).await?;
            let draft = ReportDraft {
                pos,
                description: incident.description,
                ..ReportDraft::new(incident.incident_type)
            };
            match mailto {
                Some(recipient) => {
                    let request = ComposeRequest {
                        recipient,
                        content: usecases::prepare_email(&draft),
                    };
                    println!("{}", request.mailto_url());
                }
                None => println!("{}", usecases::email_template(&draft)),
            }
        }
    }
    Ok(())
}

async fn watch_status(ctx: &Context, connections: &Connections, id: &str) -> Result<()> {
    let monitor = ctx.monitor_store_changes(connections);
    let status = flows::watch_approval_status(
        connections,
        id,
        ctx.cfg.status.poll_interval,
        |status| print_status(id, status),
    )
    .await;
    monitor.abort();
    log::debug!("Stopped watching {id}: {:?}", status.as_ref().ok());
    status?;
    Ok(())
}

fn print_pending(pending: &[Approval]) {
    if pending.is_empty() {
        println!("No pending reports");
    }
    for approval in pending {
        print_approval(approval);
    }
}

fn print_status(id: &str, status: Option<ApprovalStatus>) {
    match status {
        Some(status) => println!("{id}: {status}"),
        None => println!("{id}: unknown"),
    }
}

fn print_report(report: &Report) {
    let image = if report.image_url.is_some() {
        " [image]"
    } else {
        ""
    };
    println!(
        "{}  {}  {}  ({})  {}{image}",
        report.id,
        report.created_at,
        report.incident_type,
        report.pos(),
        report.description
    );
}

fn print_approval(approval: &Approval) {
    print_report(approval);
    let recipient = if approval.recipient_email.trim().is_empty() {
        "<no recipient>"
    } else {
        approval.recipient_email.as_str()
    };
    println!("    to: {recipient}  subject: {}", approval.subject);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_report_command() {
        let cli = Cli::try_parse_from([
            "mangrove-watch",
            "report",
            "Oil Spill",
            "--lat",
            "-6.19",
            "--lng",
            "106.83",
            "-d",
            "Oil slick near harbor entrance",
            "--role",
            "NGO",
        ])
        .unwrap();
        let Command::Report { incident, role, .. } = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(incident.incident_type, IncidentType::OilSpill);
        assert_eq!(
            incident.explicit_position().unwrap(),
            Some(MapPoint::from_lat_lng_deg(-6.19, 106.83))
        );
        assert_eq!(role, Role::Ngo);
    }

    #[test]
    fn require_both_coordinates() {
        assert!(Cli::try_parse_from(["mangrove-watch", "report", "Cutting", "--lat", "1"]).is_err());
    }

    #[test]
    fn reject_invalid_coordinates() {
        let cli = Cli::try_parse_from([
            "mangrove-watch",
            "email-template",
            "Dumping",
            "--lat",
            "91",
            "--lng",
            "0",
        ])
        .unwrap();
        let Command::EmailTemplate { incident, .. } = cli.command else {
            panic!("unexpected command");
        };
        assert!(incident.explicit_position().is_err());
    }

    #[test]
    fn parse_map_filter() {
        let cli = Cli::try_parse_from(["mangrove-watch", "map", "--filter", "sand-mining"]).unwrap();
        let Command::Map { filter } = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(filter, IncidentFilter::Only(IncidentType::SandMining));
    }

    #[test]
    fn parse_pending_watch() {
        let cli = Cli::try_parse_from(["mangrove-watch", "pending", "--watch"]).unwrap();
        assert!(matches!(cli.command, Command::Pending { watch: true }));
        let cli = Cli::try_parse_from(["mangrove-watch", "pending"]).unwrap();
        assert!(matches!(cli.command, Command::Pending { watch: false }));
    }

    #[test]
    fn parse_status_watch() {
        let cli = Cli::try_parse_from(["mangrove-watch", "status", "1700000000000-pending", "--watch"])
            .unwrap();
        assert!(matches!(cli.command, Command::Status { watch: true, .. }));
    }
}
