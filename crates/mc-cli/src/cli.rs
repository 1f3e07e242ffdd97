//! Command-line definition
//!
//! Built with the clap builder API. Record fields are parsed into their model
//! types here, so handlers never see raw strings for enums, dates or times.

use chrono::{NaiveDate, NaiveTime};
use clap::{value_parser, Arg, ArgAction, Command};
use mc_model::serde_compat::parse_time;
use mc_model::{AppointmentStatus, Availability, Gender, SPECIALIZATIONS};
use mc_view::{AppointmentColumn, DoctorColumn, PatientColumn, PatientStatus};
use std::path::PathBuf;

fn parse_clock(raw: &str) -> Result<NaiveTime, String> {
    parse_time(raw).ok_or_else(|| format!("expected HH:MM, got {raw:?}"))
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id, e.g. p_3")
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Confirm the change")
}

fn list_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive text filter"),
    )
    .arg(
        Arg::new("desc")
            .long("desc")
            .action(ArgAction::SetTrue)
            .requires("sort")
            .help("Sort descending"),
    )
    .arg(
        Arg::new("page")
            .long("page")
            .default_value("1")
            .value_parser(value_parser!(usize))
            .help("1-based page number"),
    )
    .arg(
        Arg::new("page-size")
            .long("page-size")
            .value_parser(value_parser!(usize))
            .help("Rows per page (overrides config)"),
    )
}

fn patient_field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(required).help("Full name"))
        .arg(
            Arg::new("age")
                .long("age")
                .required(required)
                .value_parser(value_parser!(u32))
                .help("Age in years (1-120)"),
        )
        .arg(
            Arg::new("gender")
                .long("gender")
                .required(required)
                .value_parser(value_parser!(Gender))
                .help("Male, Female or Other"),
        )
        .arg(Arg::new("phone").long("phone").required(required).help("Contact number"))
        .arg(
            Arg::new("disease")
                .long("disease")
                .required(required)
                .help("Condition or reason for admission"),
        )
        .arg(
            Arg::new("admitted")
                .long("admitted")
                .value_parser(value_parser!(NaiveDate))
                .help("Admission date, YYYY-MM-DD (default: today)"),
        )
        .arg(Arg::new("blood-group").long("blood-group").help("Blood group, e.g. O+"))
        .arg(Arg::new("notes").long("notes").help("Free-text notes"))
}

fn doctor_field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(required).help("Full name"))
        .arg(
            Arg::new("specialization")
                .long("specialization")
                .required(required)
                .help(format!("Specialization: {} or any other", SPECIALIZATIONS.join(", "))),
        )
        .arg(
            Arg::new("availability")
                .long("availability")
                .value_parser(value_parser!(Availability))
                .help("Available, Busy or On Leave"),
        )
        .arg(
            Arg::new("experience")
                .long("experience")
                .value_parser(value_parser!(u32))
                .help("Years of experience"),
        )
        .arg(Arg::new("phone").long("phone").help("Contact number"))
}

fn appointment_field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("patient").long("patient").required(required).help("Patient id"))
        .arg(Arg::new("doctor").long("doctor").required(required).help("Doctor id"))
        .arg(
            Arg::new("date")
                .long("date")
                .value_parser(value_parser!(NaiveDate))
                .help("Visit date, YYYY-MM-DD (default: today)"),
        )
        .arg(
            Arg::new("time")
                .long("time")
                .required(required)
                .value_parser(parse_clock)
                .help("Visit time, HH:MM"),
        )
        .arg(Arg::new("reason").long("reason").required(required).help("Reason for the visit"))
}

fn patients() -> Command {
    Command::new("patients")
        .about("Manage patients")
        .subcommand_required(true)
        .subcommand(
            list_args(Command::new("list").about("List patients"))
                .arg(
                    Arg::new("gender")
                        .long("gender")
                        .value_parser(value_parser!(Gender))
                        .help("Only this gender"),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_parser(value_parser!(PatientStatus))
                        .help("Patient status (active)"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(value_parser!(PatientColumn))
                        .help("Sort column (default: name)"),
                ),
        )
        .subcommand(Command::new("show").about("Show a patient and its appointments").arg(id_arg()))
        .subcommand(patient_field_args(Command::new("add").about("Register a patient"), true))
        .subcommand(
            patient_field_args(Command::new("update").about("Change patient fields"), false)
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a patient and all of its appointments")
                .arg(id_arg())
                .arg(yes_arg()),
        )
}

fn doctors() -> Command {
    Command::new("doctors")
        .about("Manage doctors")
        .subcommand_required(true)
        .subcommand(
            list_args(Command::new("list").about("List doctors"))
                .arg(
                    Arg::new("availability")
                        .long("availability")
                        .value_parser(value_parser!(Availability))
                        .help("Only this availability"),
                )
                .arg(
                    Arg::new("specialization")
                        .long("specialization")
                        .help("Only this specialization"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(value_parser!(DoctorColumn))
                        .help("Sort column"),
                ),
        )
        .subcommand(
            Command::new("picker")
                .about("Doctor choices for booking, as \"<name> — <specialization>\""),
        )
        .subcommand(doctor_field_args(Command::new("add").about("Add a doctor"), true))
        .subcommand(
            doctor_field_args(Command::new("update").about("Change doctor fields"), false)
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a doctor; appointments keep the reference")
                .arg(id_arg())
                .arg(yes_arg()),
        )
}

fn appointments() -> Command {
    Command::new("appointments")
        .about("Manage appointments")
        .subcommand_required(true)
        .subcommand(
            list_args(Command::new("list").about("List appointments"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_parser(value_parser!(AppointmentStatus))
                        .help("Only this status"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(value_parser!(AppointmentColumn))
                        .help("Sort column"),
                ),
        )
        .subcommand(appointment_field_args(Command::new("book").about("Book an appointment"), true))
        .subcommand(
            appointment_field_args(Command::new("update").about("Change appointment fields"), false)
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("complete")
                .about("Mark a scheduled appointment completed")
                .arg(id_arg())
                .arg(yes_arg()),
        )
        .subcommand(
            Command::new("cancel")
                .about("Cancel a scheduled appointment")
                .arg(id_arg())
                .arg(yes_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete an appointment")
                .arg(id_arg())
                .arg(yes_arg()),
        )
}

/// The `medicare` command tree
#[must_use]
pub fn command() -> Command {
    Command::new("medicare")
        .version(env!("CARGO_PKG_VERSION"))
        .about("MediCare hospital records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Store directory (default: ./medicare-data)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Machine-readable output"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More logging (-v info, -vv debug)"),
        )
        .subcommand(patients())
        .subcommand(doctors())
        .subcommand(appointments())
        .subcommand(
            Command::new("search")
                .about("Search every collection")
                .arg(Arg::new("term").required(true).help("Text to look for")),
        )
        .subcommand(
            Command::new("dashboard").about("Headline counts and previews").arg(
                Arg::new("today")
                    .long("today")
                    .value_parser(value_parser!(NaiveDate))
                    .help("Date to count as today (default: local date)"),
            ),
        )
        .subcommand(
            Command::new("theme").about("Show or flip the display theme").arg(
                Arg::new("toggle")
                    .long("toggle")
                    .action(ArgAction::SetTrue)
                    .help("Switch between dark and light"),
            ),
        )
        .subcommand(
            Command::new("seed")
                .about("Load the demo data set")
                .arg(yes_arg().help("Replace existing records")),
        )
}
