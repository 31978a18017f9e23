use clap::{Parser, Subcommand};

/// GoStock notification daemon and admin CLI
#[derive(Parser)]
#[command(name = "stocknotifyd", version, about)]
pub struct Cli {
    /// Session user id
    #[arg(long, env = "GOSTOCK_USER_ID", default_value = "1")]
    pub user_id: i64,

    /// Session display name
    #[arg(long, env = "GOSTOCK_USER_NAME", default_value = "admin")]
    pub user_name: String,

    /// Session role (compared case-sensitively: admin, Admin, manager,
    /// Yönetici are privileged)
    #[arg(long, env = "GOSTOCK_USER_ROLE", default_value = "admin")]
    pub role: String,

    /// Disable the user-level notification preference (skips new_event
    /// publishes)
    #[arg(long)]
    pub no_notifications: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the reminder scheduler and a live feed that refreshes on
    /// broadcast signals
    Watch,

    /// Print the current feed for the session role
    List,

    /// Mark a notification as read
    Read {
        #[arg(long)]
        id: i64,
    },

    /// Remove a notification
    Remove {
        #[arg(long)]
        id: i64,
    },

    /// Clear all notifications
    Clear,
}
