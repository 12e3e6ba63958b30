//! Interactive first-time setup (`adhanctl config init`).
//!
//! The wizard only talks to an [`Interactor`], so it can be driven by a
//! terminal or by a scripted list of answers.

use std::io::{self, BufRead, Write};

use adhanctl_providers::{CALCULATION_METHODS, SCHOOLS, method_name, school_name};

use crate::config::Config;

/// Asks questions and shows messages.
pub trait Interactor {
    /// Shows `question` and returns the trimmed answer. An empty answer
    /// yields `default` when there is one.
    fn ask(&mut self, question: &str, default: Option<&str>) -> io::Result<String>;

    /// Shows an informational line.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// Line-based interactor over a reader and a writer.
pub struct StdioInteractor<R, W> {
    input: R,
    output: W,
}

impl StdioInteractor<io::StdinLock<'static>, io::Stdout> {
    /// Interactor on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdioInteractor<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Interactor for StdioInteractor<R, W> {
    fn ask(&mut self, question: &str, default: Option<&str>) -> io::Result<String> {
        match default {
            Some(d) => write!(self.output, "{} [{}]: ", question, d)?,
            None => write!(self.output, "{}: ", question)?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before setup finished",
            ));
        }

        let answer = line.trim();
        Ok(match (answer.is_empty(), default) {
            (true, Some(d)) => d.to_string(),
            _ => answer.to_string(),
        })
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }
}

/// Runs the wizard. Cache and daemon settings are carried over from
/// `existing`; everything else is asked for, with `existing` as defaults.
pub fn run_config_init(ui: &mut dyn Interactor, existing: &Config) -> io::Result<Config> {
    let mut config = existing.clone();

    ui.say("adhanctl setup")?;
    ui.say("")?;

    let has_coords = existing.location.latitude.is_some() && existing.location.longitude.is_some();
    if ask_yes_no(ui, "Use coordinates instead of city/country?", has_coords)? {
        let lat = ask_number(ui, "Latitude", existing.location.latitude, -90.0..=90.0)?;
        let lon = ask_number(ui, "Longitude", existing.location.longitude, -180.0..=180.0)?;
        config.location.latitude = Some(lat);
        config.location.longitude = Some(lon);
        config.location.city = None;
        config.location.country = None;
    } else {
        let city = ask_required(ui, "City", existing.location.city.as_deref())?;
        let country = ask_required(ui, "Country", existing.location.country.as_deref())?;
        config.location.city = Some(city);
        config.location.country = Some(country);
        config.location.latitude = None;
        config.location.longitude = None;
    }

    ui.say("")?;
    ui.say("Calculation methods:")?;
    for (id, name) in CALCULATION_METHODS {
        ui.say(&format!("  {:>2}  {}", id, name))?;
    }
    config.calculation.method = ask_id(ui, "Calculation method", existing.calculation.method, method_name)?;

    ui.say("")?;
    ui.say("Asr schools:")?;
    for (id, name) in SCHOOLS {
        ui.say(&format!("  {:>2}  {}", id, name))?;
    }
    config.calculation.school = ask_id(ui, "Asr school", existing.calculation.school, school_name)?;

    ui.say("")?;
    config.display.ampm = ask_yes_no(ui, "Use 12-hour clock?", existing.display.ampm)?;
    config.display.arabic = ask_yes_no(ui, "Show the Hijri date in Arabic?", existing.display.arabic)?;

    Ok(config)
}

fn ask_yes_no(ui: &mut dyn Interactor, question: &str, default: bool) -> io::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        let answer = ui.ask(&format!("{} ({})", question, hint), None)?;
        match answer.to_ascii_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => ui.say("Please answer y or n.")?,
        }
    }
}

fn ask_required(ui: &mut dyn Interactor, question: &str, default: Option<&str>) -> io::Result<String> {
    loop {
        let answer = ui.ask(question, default)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        ui.say(&format!("{} is required.", question))?;
    }
}

fn ask_number(
    ui: &mut dyn Interactor,
    question: &str,
    default: Option<f64>,
    range: std::ops::RangeInclusive<f64>,
) -> io::Result<f64> {
    let default = default.map(|d| d.to_string());
    loop {
        let answer = ui.ask(question, default.as_deref())?;
        match answer.parse::<f64>() {
            Ok(v) if range.contains(&v) && v != 0.0 => return Ok(v),
            _ => ui.say(&format!(
                "Enter a non-zero number between {} and {}.",
                range.start(),
                range.end()
            ))?,
        }
    }
}

fn ask_id(
    ui: &mut dyn Interactor,
    question: &str,
    default: u8,
    name: fn(u8) -> Option<&'static str>,
) -> io::Result<u8> {
    let default = default.to_string();
    loop {
        let answer = ui.ask(question, Some(&default))?;
        match answer.parse::<u8>() {
            Ok(id) if name(id).is_some() => return Ok(id),
            _ => ui.say("Pick one of the ids listed above.")?,
        }
    }
}
