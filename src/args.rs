//! These structs provide the CLI interface for the payoff CLI.

use crate::model::PayoffMethod;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// payoff: A command-line tool for planning how to pay off your debts.
///
/// Add each of your debts with its balance and interest rate, tell payoff how much you can put
/// toward them every month, and it will tell you which debt to pay first, how many months it will
/// take, and which months of the year are spent paying.
///
/// Two payoff methods are supported: snowball pays the smallest balance first and avalanche pays
/// the highest interest rate first.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is $HOME/payoff.
    /// If you want it somewhere else then pass --payoff-home or set PAYOFF_HOME.
    Init,
    /// Add a new debt with a zero balance and a zero interest rate.
    Add(AddArgs),
    /// Set the balance, interest rate and, optionally, the months until payoff of a debt.
    Update(UpdateArgs),
    /// Delete a debt.
    Delete(DeleteArgs),
    /// Choose the payoff method: snowball or avalanche.
    Method(MethodArgs),
    /// Set the monthly amount you can put toward your debts.
    Income(IncomeArgs),
    /// List your debts in the order they should be paid off.
    List,
    /// Show the total debt, the months until payoff and the projected payoff date.
    Summary,
    /// Show which months of the year are spent paying off debt.
    Calendar,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where payoff data and configuration is held. Defaults to ~/payoff
    #[arg(long, env = "PAYOFF_HOME", default_value_t = default_payoff_home())]
    payoff_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn payoff_home(&self) -> &DisplayPath {
        &self.payoff_home
    }
}

/// Args for the `payoff add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// A name for the debt, e.g. "Car Loan".
    title: String,
}

impl AddArgs {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Args for the `payoff update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The id of the debt, as shown by `payoff list`.
    id: String,

    /// The amount owed, e.g. 5000 or $5,000.00
    #[arg(long)]
    balance: String,

    /// The annual interest rate as a percentage, e.g. 22 or 22%
    #[arg(long)]
    rate: String,

    /// Your own estimate of the months needed to pay off this debt. The sum across all debts
    /// bounds the highlighted range of the calendar.
    #[arg(long)]
    months: Option<String>,
}

impl UpdateArgs {
    pub fn new(
        id: impl Into<String>,
        balance: impl Into<String>,
        rate: impl Into<String>,
        months: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            balance: balance.into(),
            rate: rate.into(),
            months,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> &str {
        &self.balance
    }

    pub fn rate(&self) -> &str {
        &self.rate
    }

    pub fn months(&self) -> Option<&str> {
        self.months.as_deref()
    }
}

/// Args for the `payoff delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the debt, as shown by `payoff list`.
    id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `payoff method` command.
#[derive(Debug, Parser, Clone)]
pub struct MethodArgs {
    /// snowball pays the lowest balance first, avalanche pays the highest interest rate first.
    #[arg(value_enum)]
    method: PayoffMethod,
}

impl MethodArgs {
    pub fn new(method: PayoffMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> PayoffMethod {
        self.method
    }
}

/// Args for the `payoff income` command.
#[derive(Debug, Parser, Clone)]
pub struct IncomeArgs {
    /// The amount available each month, e.g. 650 or $650.00
    amount: String,
}

impl IncomeArgs {
    pub fn new(amount: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }
}

fn default_payoff_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("payoff"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --payoff-home or PAYOFF_HOME instead of relying on the default \
                payoff home directory.",
            );
            PathBuf::from("payoff")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
