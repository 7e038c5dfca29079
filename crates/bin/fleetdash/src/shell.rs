//! Console shell: the login form, the navigation header and the dashboard
//! views, rendered as text or JSON.
//!
//! Every command returns the text to print. Data views refuse to run
//! without a signed-in session.

use fleetdash_app::ports::{Backend, KeyValueStore, NetworkConditions};
use fleetdash_app::services::session_service::SessionService;
use fleetdash_domain::credentials::LoginCredentials;
use fleetdash_domain::error::{AuthError, FleetDashError};
use fleetdash_domain::id::ServerId;
use fleetdash_domain::metrics::{ActivityStatus, DashboardMetrics};
use fleetdash_domain::server::{ServerAction, ServerDetail, ServerSummary, ServiceState};
use fleetdash_domain::session::UserProfile;
use serde::Serialize;

const BRAND: &str = "Cloud Systems";
const FALLBACK_NAME: &str = "User";
const FALLBACK_ROLE: &str = "Admin";
const FALLBACK_EMAIL: &str = "user@example.com";

/// How command output is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// Raw payloads as pretty JSON.
    Json,
}

/// Who the header says is signed in. Missing profile fields fall back to
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub role: String,
    pub email: String,
}

impl Identity {
    #[must_use]
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        Self {
            name: or_fallback(profile.map(|p| p.name.as_str()), FALLBACK_NAME),
            role: or_fallback(profile.map(|p| p.role.as_str()), FALLBACK_ROLE),
            email: or_fallback(profile.map(|p| p.email.as_str()), FALLBACK_EMAIL),
        }
    }

    /// One-line navigation header.
    #[must_use]
    pub fn header(&self) -> String {
        format!("{BRAND} | {} ({})", self.name, self.role)
    }
}

fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// The interactive surface over one [`SessionService`].
pub struct Console<S, B, N> {
    session: SessionService<S, B, N>,
    format: OutputFormat,
}

impl<S, B, N> Console<S, B, N>
where
    S: KeyValueStore,
    B: Backend,
    N: NetworkConditions,
{
    pub fn new(session: SessionService<S, B, N>, format: OutputFormat) -> Self {
        Self { session, format }
    }

    /// Submit the login form.
    ///
    /// The form is checked locally first; an invalid form never reaches
    /// the dispatcher.
    ///
    /// # Errors
    ///
    /// Returns the first failing form check, or the login failure.
    pub async fn submit_login(
        &mut self,
        form: &LoginCredentials,
    ) -> Result<String, FleetDashError> {
        form.validate()?;
        let profile = self.session.login(form).await?;
        match self.format {
            OutputFormat::Json => to_json(&profile),
            OutputFormat::Text => Ok(format!("Signed in as {} ({})", profile.name, profile.role)),
        }
    }

    /// Sign out. Always succeeds.
    pub async fn logout(&mut self) -> String {
        self.session.logout().await;
        "Signed out".to_string()
    }

    /// The detailed identity view.
    ///
    /// # Errors
    ///
    /// Only fails when JSON output cannot be produced.
    pub async fn whoami(&self) -> Result<String, FleetDashError> {
        if !self.session.is_logged_in() {
            return match self.format {
                OutputFormat::Json => Ok("null".to_string()),
                OutputFormat::Text => Ok("Not signed in".to_string()),
            };
        }
        let identity = self.identity().await;
        match self.format {
            OutputFormat::Json => to_json(&identity),
            OutputFormat::Text => Ok(format!("{}\n{}", identity.header(), identity.email)),
        }
    }

    /// # Errors
    ///
    /// [`AuthError::NotSignedIn`] without a session, otherwise any dispatcher error.
    pub async fn metrics(&self) -> Result<String, FleetDashError> {
        self.require_login()?;
        let metrics = self.session.dispatcher().dashboard_metrics().await?;
        self.present(&metrics, render_metrics).await
    }

    /// # Errors
    ///
    /// [`AuthError::NotSignedIn`] without a session, otherwise any dispatcher error.
    pub async fn servers(&self) -> Result<String, FleetDashError> {
        self.require_login()?;
        let servers = self.session.dispatcher().servers().await?;
        self.present(servers.as_slice(), render_servers).await
    }

    /// # Errors
    ///
    /// [`AuthError::NotSignedIn`] without a session, otherwise any dispatcher error.
    pub async fn server(&self, id: ServerId) -> Result<String, FleetDashError> {
        self.require_login()?;
        let detail = self.session.dispatcher().server_details(id).await?;
        self.present(&detail, render_detail).await
    }

    /// Request a control action and show its acknowledgement.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotSignedIn`] without a session.
    pub async fn server_action(
        &self,
        id: ServerId,
        action: ServerAction,
    ) -> Result<String, FleetDashError> {
        self.require_login()?;
        let ack = self.session.dispatcher().server_action(id, action).await;
        match self.format {
            OutputFormat::Json => to_json(&ack),
            OutputFormat::Text => Ok(ack.message),
        }
    }

    fn require_login(&self) -> Result<(), FleetDashError> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(AuthError::NotSignedIn.into())
        }
    }

    async fn identity(&self) -> Identity {
        Identity::from_profile(self.session.current_user().await.as_ref())
    }

    async fn present<T>(
        &self,
        value: &T,
        render: impl FnOnce(&T) -> String,
    ) -> Result<String, FleetDashError>
    where
        T: Serialize + ?Sized,
    {
        match self.format {
            OutputFormat::Json => to_json(value),
            OutputFormat::Text => {
                let header = self.identity().await.header();
                Ok(format!("{header}\n\n{}", render(value)))
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FleetDashError> {
    serde_json::to_string_pretty(value).map_err(|err| FleetDashError::Storage(Box::new(err)))
}

fn render_metrics(metrics: &DashboardMetrics) -> String {
    let mut lines = vec![
        format!(
            "Servers    {}/{} active ({} inactive)",
            metrics.active_servers,
            metrics.total_servers,
            metrics.inactive_servers()
        ),
        format!("Uptime     {}", metrics.total_uptime),
        format!(
            "Storage    {} of {}",
            metrics.used_storage, metrics.total_storage
        ),
        format!("Bandwidth  {} this month", metrics.monthly_bandwidth),
        format!("Alerts     {}", metrics.active_alerts),
        format!(
            "Usage      CPU {}%  Memory {}%  Network {} Mbps",
            metrics.cpu_usage, metrics.memory_usage, metrics.network_traffic
        ),
        String::new(),
        "Recent activity".to_string(),
    ];
    lines.extend(metrics.recent_activity.iter().map(|entry| {
        let status = match entry.status {
            ActivityStatus::Success => "ok",
            ActivityStatus::Warning => "warn",
            ActivityStatus::Error => "error",
        };
        format!(
            "  [{status:<5}] {} on {} ({})",
            entry.action, entry.server, entry.timestamp
        )
    }));
    lines.join("\n")
}

fn render_servers(servers: &[ServerSummary]) -> String {
    let header = format!(
        "{:>3}  {:<16} {:<8} {:>5} {:>5} {:>5}  {:<14} {}",
        "ID", "NAME", "STATUS", "CPU", "MEM", "DISK", "LOCATION", "IP"
    );
    let rows = servers.iter().map(|s| {
        format!(
            "{:>3}  {:<16} {:<8} {:>4}% {:>4}% {:>4}%  {:<14} {}",
            s.id, s.name, s.status, s.cpu, s.memory, s.storage, s.location, s.ip
        )
    });
    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_detail(detail: &ServerDetail) -> String {
    let s = &detail.summary;
    let mut lines = vec![
        format!("{} (#{}) {}", s.name, s.id, s.status),
        format!("  Location  {}", s.location),
        format!("  IP        {}", s.ip),
        format!("  OS        {}", detail.os),
        format!("  Uptime    {}", s.uptime),
        format!(
            "  Specs     {} cores, {} RAM, {}",
            detail.specs.cores, detail.specs.ram, detail.specs.disk
        ),
        format!(
            "  Usage     CPU {}%  Memory {}%  Storage {}%",
            s.cpu, s.memory, s.storage
        ),
        format!(
            "  Network   in {}  out {}",
            detail.metrics.network_in, detail.metrics.network_out
        ),
        format!(
            "  Disk      read {}  write {}",
            detail.metrics.disk_read, detail.metrics.disk_write
        ),
        String::new(),
        "Services".to_string(),
    ];
    lines.extend(detail.services.iter().map(|service| {
        let state = match service.status {
            ServiceState::Running => "running",
            ServiceState::Stopped => "stopped",
        };
        format!("  {:<12} :{:<6} {state}", service.name, service.port)
    }));
    lines.join("\n")
}
