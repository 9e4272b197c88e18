use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;

use crate::application::{Ledger, LedgerError};
use crate::auth::{Authenticator, Credentials, MemoryAuthenticator, Session};
use crate::domain::{
    AmountInput, DATE_FORMAT, Operation, OperationId, OperationInput, format_cents,
};
use crate::io::Exporter;
use crate::logging::{init_logging, resolve_level};

/// Debora - personal finance operations tracker
#[derive(Parser)]
#[command(name = "debora")]
#[command(about = "Record income and expenses, see your balance and savings rate")]
#[command(version)]
pub struct Cli {
    /// Start with the sample operations (a salary and a rent payment)
    #[arg(long)]
    pub sample: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level spec, e.g. "info" or "warn,debora::application=debug"
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let level = resolve_level(self.verbose, self.log_level.as_deref());
        init_logging(&level).map_err(anyhow::Error::msg)?;

        let ledger = if self.sample {
            Ledger::with_sample_data()
        } else {
            Ledger::new()
        };

        let stdin = std::io::stdin();
        let mut shell = Shell::new(ledger, MemoryAuthenticator::new());
        if stdin.is_terminal() {
            shell = shell.with_prompt("debora> ").with_delete_confirmation();
        }

        let stdout = std::io::stdout();
        shell.run(stdin.lock(), stdout.lock())
    }
}

/// One line typed into the session.
#[derive(Parser)]
#[command(name = "debora", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in and open the dashboard
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Record a new operation
    Add {
        /// Description, e.g. "Coffee"
        #[arg(short, long)]
        label: String,

        /// Signed amount: positive for income, negative for expense
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Category tag, e.g. "income" or "groceries"
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Change an operation; omitted fields keep their current value
    Edit {
        /// Operation ID (or a unique prefix of it)
        id: String,

        #[arg(short, long)]
        label: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an operation
    Delete {
        /// Operation ID (or a unique prefix of it)
        id: String,

        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },

    /// List operations, newest first
    List {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show balance, income, expenses and savings rate
    Summary,

    /// Show totals per category
    Report,

    /// Export data
    Export {
        /// What to export
        #[arg(value_enum)]
        target: ExportTarget,

        /// Output format (summary and full are JSON only)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Output file (printed if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportTarget {
    Operations,
    Summary,
    Full,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

/// Whether the session continues after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session: owns the ledger for its whole lifetime and gates
/// it behind a login.
pub struct Shell<A: Authenticator> {
    ledger: Ledger,
    auth: A,
    session: Option<Session>,
    prompt: Option<String>,
    confirm_deletes: bool,
    pending_delete: Option<OperationId>,
}

impl<A: Authenticator> Shell<A> {
    pub fn new(ledger: Ledger, auth: A) -> Self {
        Self {
            ledger,
            auth,
            session: None,
            prompt: None,
            confirm_deletes: false,
            pending_delete: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Ask before deleting unless `delete --yes` is used.
    pub fn with_delete_confirmation(mut self) -> Self {
        self.confirm_deletes = true;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Read and execute lines until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(
            out,
            "Welcome to debora. Type `register` or `login` to begin, `help` for commands."
        )?;

        let mut lines = input.lines();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(out, "{}", prompt)?;
                out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            let line = line.context("Failed to read input")?;

            match self.execute(&line, &mut out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => writeln!(out, "Error: {:#}", err)?,
            }
        }

        writeln!(out, "Goodbye.")?;
        Ok(())
    }

    /// Execute one line of input.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if let Some(id) = self.pending_delete.take() {
            let answer = line.trim().to_lowercase();
            if answer == "y" || answer == "yes" {
                self.delete_operation(id, out)?;
            } else {
                writeln!(out, "Delete cancelled.")?;
            }
            return Ok(Flow::Continue);
        }

        let tokens = split_args(line).map_err(anyhow::Error::msg)?;
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }

        let parsed = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(err) => {
                // Covers `help` and `--help` as well as real mistakes.
                write!(out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };
        debug!("event=shell_command name={}", tokens[0]);

        match parsed.command {
            ShellCommand::Register { email, password } => {
                self.auth.register(&Credentials::new(email, password))?;
                writeln!(out, "Account created, you can log in now.")?;
            }
            ShellCommand::Login { email, password } => {
                let session = self.auth.authenticate(&Credentials::new(email, password))?;
                writeln!(out, "Signed in as {}", session.email)?;
                self.session = Some(session);
                print_dashboard(&self.ledger, out)?;
            }
            ShellCommand::Logout => {
                if self.session.take().is_some() {
                    writeln!(out, "Signed out.")?;
                } else {
                    writeln!(out, "Not signed in.")?;
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),

            ShellCommand::Add {
                label,
                amount,
                category,
                date,
            } => {
                self.require_session()?;
                let date = date.unwrap_or_else(|| Local::now().format(DATE_FORMAT).to_string());
                let input = OperationInput::new(label, amount, category, date);
                match self.ledger.create(&input) {
                    Ok(op) => {
                        notify_success(out, "Operation created successfully")?;
                        print_operation(out, &op)?;
                    }
                    Err(err) => notify_failure(out, &err)?,
                }
            }

            ShellCommand::Edit {
                id,
                label,
                amount,
                category,
                date,
            } => {
                self.require_session()?;
                let Some(id) = resolve_id(&self.ledger, &id, out)? else {
                    return Ok(Flow::Continue);
                };
                // Start from the current values, like a pre-filled form.
                let mut input = match self.ledger.get(id) {
                    Ok(op) => OperationInput::from_operation(op),
                    Err(err) => {
                        notify_failure(out, &err)?;
                        return Ok(Flow::Continue);
                    }
                };
                if let Some(label) = label {
                    input.label = label;
                }
                if let Some(amount) = amount {
                    input.amount = AmountInput::Text(amount);
                }
                if let Some(category) = category {
                    input.category = category;
                }
                if let Some(date) = date {
                    input.date = date;
                }

                match self.ledger.update(id, &input) {
                    Ok(op) => {
                        notify_success(out, "Operation updated successfully")?;
                        print_operation(out, &op)?;
                    }
                    Err(err) => notify_failure(out, &err)?,
                }
            }

            ShellCommand::Delete { id, yes } => {
                self.require_session()?;
                let Some(id) = resolve_id(&self.ledger, &id, out)? else {
                    return Ok(Flow::Continue);
                };
                if self.confirm_deletes && !yes {
                    match self.ledger.get(id) {
                        Ok(op) => {
                            print_operation(out, op)?;
                            writeln!(
                                out,
                                "Are you sure you want to delete this operation? \
                                 This action cannot be undone. [y/N]"
                            )?;
                            self.pending_delete = Some(id);
                        }
                        Err(err) => notify_failure(out, &err)?,
                    }
                } else {
                    self.delete_operation(id, out)?;
                }
            }

            ShellCommand::List { category } => {
                self.require_session()?;
                let operations: Vec<&Operation> = match &category {
                    Some(category) => self.ledger.operations_in_category(category),
                    None => self.ledger.operations().collect(),
                };
                print_operations(out, &operations)?;
            }

            ShellCommand::Summary => {
                self.require_session()?;
                print_summary(&self.ledger, out)?;
            }

            ShellCommand::Report => {
                self.require_session()?;
                print_category_report(&self.ledger, out)?;
            }

            ShellCommand::Export {
                target,
                format,
                output,
            } => {
                self.require_session()?;
                run_export_command(&self.ledger, target, format, output.as_deref(), out)?;
            }
        }

        Ok(Flow::Continue)
    }

    fn delete_operation<W: Write>(&mut self, id: OperationId, out: &mut W) -> Result<()> {
        match self.ledger.delete(id) {
            Ok(_) => notify_success(out, "Operation deleted successfully"),
            Err(err) => notify_failure(out, &err),
        }
    }

    fn require_session(&self) -> Result<()> {
        if self.session.is_none() {
            bail!("Please log in first (use `register` then `login`)");
        }
        Ok(())
    }
}

fn notify_success<W: Write>(out: &mut W, message: &str) -> Result<()> {
    writeln!(out, "Success: {}", message)?;
    Ok(())
}

/// Tell the user whether to fix their input or refresh their view.
fn notify_failure<W: Write>(out: &mut W, err: &LedgerError) -> Result<()> {
    match err {
        LedgerError::Validation(validation) => {
            writeln!(out, "Invalid input:")?;
            for field_error in &validation.errors {
                writeln!(out, "  {}: {}", field_error.field, field_error.message)?;
            }
        }
        LedgerError::NotFound(id) => {
            writeln!(
                out,
                "Not found: operation {} no longer exists. Run `list` to refresh.",
                id
            )?;
        }
    }
    Ok(())
}

/// Resolve a full id or a unique id prefix. Prints the problem and returns
/// `None` when nothing (or more than one operation) matches.
fn resolve_id<W: Write>(ledger: &Ledger, text: &str, out: &mut W) -> Result<Option<OperationId>> {
    if let Some(id) = OperationId::parse(text) {
        return Ok(Some(id));
    }

    let prefix = text.trim().to_lowercase();
    let matches: Vec<OperationId> = if prefix.is_empty() {
        Vec::new()
    } else {
        ledger
            .operations()
            .map(|op| op.id)
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect()
    };

    match matches.as_slice() {
        [id] => Ok(Some(*id)),
        [] => {
            writeln!(
                out,
                "Not found: no operation with id '{}'. Run `list` to refresh.",
                text
            )?;
            Ok(None)
        }
        _ => {
            writeln!(
                out,
                "Ambiguous id '{}' matches {} operations, type more characters.",
                text,
                matches.len()
            )?;
            Ok(None)
        }
    }
}

fn print_dashboard<W: Write>(ledger: &Ledger, out: &mut W) -> Result<()> {
    writeln!(out)?;
    print_summary(ledger, out)?;
    writeln!(out)?;
    let operations: Vec<&Operation> = ledger.operations().collect();
    print_operations(out, &operations)
}

fn print_summary<W: Write>(ledger: &Ledger, out: &mut W) -> Result<()> {
    let summary = ledger.summarize();
    writeln!(
        out,
        "Total Balance:   {:>15}",
        format_cents(summary.total_balance)
    )?;
    writeln!(
        out,
        "Total Income:    {:>15}",
        format_cents(summary.total_income)
    )?;
    writeln!(
        out,
        "Total Expenses:  {:>15}",
        format_cents(summary.total_expenses)
    )?;
    writeln!(out, "Savings Rate:    {:>14.1}%", summary.savings_rate)?;
    Ok(())
}

fn print_operation<W: Write>(out: &mut W, op: &Operation) -> Result<()> {
    writeln!(
        out,
        "  {} {} {} {} ({})",
        op.id,
        op.date.format(DATE_FORMAT),
        op.label,
        format_cents(op.amount_cents),
        op.category
    )?;
    Ok(())
}

fn print_operations<W: Write>(out: &mut W, operations: &[&Operation]) -> Result<()> {
    if operations.is_empty() {
        writeln!(out, "No operations found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10} {:<10} {:<24} {:<8} {:>12} {:<16}",
        "ID", "DATE", "LABEL", "KIND", "AMOUNT", "CATEGORY"
    )?;
    writeln!(out, "{}", "-".repeat(85))?;
    for op in operations {
        let short_id: String = op.id.to_string().chars().take(8).collect();
        let label = if op.label.chars().count() > 24 {
            format!("{}...", op.label.chars().take(21).collect::<String>())
        } else {
            op.label.clone()
        };
        writeln!(
            out,
            "{:<10} {:<10} {:<24} {:<8} {:>12} {:<16}",
            short_id,
            op.date.format(DATE_FORMAT),
            label,
            op.kind(),
            format_cents(op.amount_cents.abs()),
            op.category
        )?;
    }
    Ok(())
}

fn print_category_report<W: Write>(ledger: &Ledger, out: &mut W) -> Result<()> {
    let report = ledger.category_report();
    if report.categories.is_empty() {
        writeln!(out, "No operations found.")?;
        return Ok(());
    }

    writeln!(out, "Category Report")?;
    writeln!(
        out,
        "{:<20} {:>12} {:>8} {:>12} {:>8}",
        "CATEGORY", "TOTAL", "COUNT", "AVERAGE", "%"
    )?;
    writeln!(out, "{}", "-".repeat(64))?;
    for cat in &report.categories {
        writeln!(
            out,
            "{:<20} {:>12} {:>8} {:>12} {:>7.1}%",
            cat.category,
            format_cents(cat.total),
            cat.count,
            format_cents(cat.average),
            cat.percentage
        )?;
    }
    Ok(())
}

fn run_export_command<W: Write>(
    ledger: &Ledger,
    target: ExportTarget,
    format: Option<ExportFormat>,
    output: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let format = match (target, format) {
        (ExportTarget::Operations, Some(format)) => format,
        (ExportTarget::Operations, None) => ExportFormat::Csv,
        (_, None | Some(ExportFormat::Json)) => ExportFormat::Json,
        (_, Some(ExportFormat::Csv)) => bail!("Summary and full exports are JSON only"),
    };

    let mut buffer = Vec::new();
    let exporter = Exporter::new(ledger);
    let count = match (target, format) {
        (ExportTarget::Operations, ExportFormat::Csv) => {
            exporter.export_operations_csv(&mut buffer)?
        }
        (ExportTarget::Operations, ExportFormat::Json) => {
            exporter.export_operations_json(&mut buffer)?
        }
        (ExportTarget::Summary, _) => {
            exporter.export_summary_json(&mut buffer)?;
            1
        }
        (ExportTarget::Full, _) => exporter.export_full_json(&mut buffer)?,
    };
    if format == ExportFormat::Json {
        buffer.push(b'\n');
    }

    match output {
        Some(path) => {
            std::fs::write(path, &buffer)
                .with_context(|| format!("Failed to write export to '{}'", path))?;
            writeln!(out, "Exported {} record(s) to {}", count, path)?;
        }
        None => out.write_all(&buffer)?,
    }
    Ok(())
}

/// Split a command line into words. Single or double quotes group words,
/// e.g. `add --label "Coffee beans"`.
pub fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated quote {}", q));
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}
