//! Terminal entry point for the roster wizard.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;

use roster_company::{CompanyField, CompanyForm, CompanyFormErrors};
use roster_employees::{CvFile, EmployeeEdit, EmployeeField, JobTitle};
use roster_observability::LogFormat;
use roster_wizard::{ConfirmPrompt, SubmitOutcome, Wizard, WizardConfig, WizardStep};

const PUSH_WAIT: Duration = Duration::from_secs(10);

struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        matches!(
            ask(&format!("{message} [y/N]")).as_deref().map(str::trim),
            Some("y" | "Y" | "yes")
        )
    }
}

/// Print `label` and read one line. `None` on end of input.
fn ask(label: &str) -> Option<String> {
    print!("{label}: ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// Ask with the current value shown; an empty answer keeps it.
fn ask_with_default(label: &str, current: &str) -> Option<String> {
    let answer = if current.is_empty() {
        ask(label)?
    } else {
        ask(&format!("{label} [{current}]"))?
    };
    Some(if answer.is_empty() { current.to_string() } else { answer })
}

fn header(step: WizardStep, title: &str) {
    println!();
    println!("{} {title}", step.ordinal());
}

fn print_company_errors(errors: &CompanyFormErrors) {
    for field in [CompanyField::Name, CompanyField::Email, CompanyField::Employees] {
        if let Some(err) = errors.get(field) {
            println!("  ! {err}");
        }
    }
}

/// Company step. Returns `false` when input ends.
async fn company_step(wizard: &mut Wizard) -> anyhow::Result<bool> {
    loop {
        header(WizardStep::Company, "Company data");
        let current = wizard.company_form();
        let Some(form) = read_company_form(&current) else {
            return Ok(false);
        };

        match wizard.submit_company(&form).await? {
            SubmitOutcome::Advanced { discarded } => {
                if discarded {
                    println!("Employee data was removed.");
                }
                return Ok(true);
            }
            SubmitOutcome::Rejected(errors) => print_company_errors(&errors),
            SubmitOutcome::Abandoned => println!("Kept the previous employee count."),
        }
    }
}

fn read_company_form(current: &CompanyForm) -> Option<CompanyForm> {
    Some(CompanyForm {
        name: ask_with_default("Company name", &current.name)?,
        email: ask_with_default("Email", &current.email)?,
        employees: ask_with_default("Number of employees (at least 1)", &current.employees)?,
        description: ask_with_default("Description", &current.description)?,
    })
}

fn job_title_menu() -> String {
    JobTitle::ALL
        .iter()
        .map(|title| title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Employee step: one pass over every declared slot.
fn employee_step(wizard: &mut Wizard) -> anyhow::Result<bool> {
    header(WizardStep::Employees, "Employee data");
    let slots = wizard.state().employees.slot_count();

    for index in 0..slots {
        wizard.process_pending();
        let record = wizard.state().employees.record(index).cloned().unwrap_or_default();
        println!();
        println!("Employee {}", index + 1);

        let Some(name) = ask_with_default("Name", &record.name) else {
            return Ok(false);
        };
        report(wizard.edit_employee(index, EmployeeEdit::Name(name))?);

        let Some(email) = ask_with_default("Email", &record.email) else {
            return Ok(false);
        };
        report(wizard.edit_employee(index, EmployeeEdit::Email(email))?);

        let current_title = record.job_title.map(|t| t.as_str()).unwrap_or_default();
        let title_label = format!("Job title ({})", job_title_menu());
        let Some(title) = ask_with_default(&title_label, current_title) else {
            return Ok(false);
        };
        if !title.is_empty() {
            match title.parse::<JobTitle>() {
                Ok(title) => report(wizard.edit_employee(index, EmployeeEdit::JobTitle(title))?),
                Err(err) => println!("  ! {err}"),
            }
        }

        let current_age = record.age.map(|age| age.to_string()).unwrap_or_default();
        let Some(age) = ask_with_default("Age", &current_age) else {
            return Ok(false);
        };
        report(wizard.edit_employee(index, EmployeeEdit::Age(age))?);

        let current_cv = record
            .cv
            .as_ref()
            .map(|cv| cv.path.display().to_string())
            .unwrap_or_default();
        let Some(cv) = ask_with_default("CV file (optional)", &current_cv) else {
            return Ok(false);
        };
        if !cv.is_empty() && cv != current_cv {
            wizard.upload_cv(index, CvFile::new(cv))?;
        }
    }

    for panel in wizard.state().employees.panels() {
        for (field, err) in &panel.errors {
            let label = field_label(*field);
            println!("  ! employee {} {label}: {err}", panel.number());
        }
    }
    Ok(true)
}

fn field_label(field: EmployeeField) -> &'static str {
    match field {
        EmployeeField::Name => "name",
        EmployeeField::Email => "email",
        EmployeeField::JobTitle => "job title",
        EmployeeField::Age => "age",
        EmployeeField::Cv => "cv",
    }
}

fn report(error: Option<roster_core::FieldError>) {
    if let Some(err) = error {
        println!("  ! {err}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WizardConfig::from_env()?;
    roster_observability::tracing::init(LogFormat::from_json_flag(config.log_json));

    let mut wizard = Wizard::from_config(&config, Box::new(StdinPrompt))
        .await
        .context("failed to start wizard")?;
    if wizard.restore().await? {
        println!("Restored previously saved data.");
    }

    'wizard: loop {
        if wizard.step() == WizardStep::Company && !company_step(&mut wizard).await? {
            return Ok(());
        }
        if !employee_step(&mut wizard)? {
            return Ok(());
        }

        loop {
            let choice = ask("[s]ave, [b]ack, [c]lear saved data or [q]uit");
            match choice.as_deref().map(str::trim) {
                Some("s" | "save") => break 'wizard,
                Some("b" | "back") => {
                    wizard.back();
                    break;
                }
                Some("c" | "clear") => {
                    wizard.clear_storage().await?;
                    println!("Saved data cleared.");
                }
                Some("q" | "quit") | None => return Ok(()),
                Some(_) => {}
            }
        }
    }

    wizard.process_pending();
    let push = wizard.save().await?;
    println!("Saved locally.");

    if tokio::time::timeout(PUSH_WAIT, push).await.is_err() {
        tracing::warn!("remote push still running; exiting");
        return Ok(());
    }
    wizard.process_pending();
    Ok(())
}
