//! Command dispatch: bridges CLI args -> facade calls -> output formatting.

pub mod call;
pub mod config_cmd;
pub mod devices;
pub mod features;
pub mod schedules;
pub mod system;
pub mod util;
pub mod wifi;

use livebox_core::Livebox;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to its handler.
///
/// Every command except `login` starts with a capability discovery, which
/// the client needs before it can validate and route feature calls.
pub async fn dispatch(cmd: Command, livebox: &Livebox, global: &GlobalOpts) -> Result<(), CliError> {
    if matches!(cmd, Command::Login) {
        return system::login(livebox, global).await;
    }

    let capabilities = livebox.capabilities().await?;
    match cmd {
        Command::Info => system::info(livebox, global).await,
        Command::Capabilities => system::capabilities(&capabilities, global),
        Command::Reboot => system::reboot(livebox, global).await,
        Command::Wifi => wifi::radios(livebox, global).await,
        Command::Wlan { ifc } => wifi::wlan(livebox, &ifc, global).await,
        Command::Ap(args) => wifi::handle_ap(livebox, args, global).await,
        Command::Devices(args) => devices::handle(livebox, args, global).await,
        Command::Schedules(args) => schedules::handle(livebox, args, global).await,
        Command::Call(args) => call::handle(livebox, args, global).await,
        // Handled before a connection is made
        Command::Config(_) | Command::Features(_) | Command::Login => unreachable!(),
    }
}
