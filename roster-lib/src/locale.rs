use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Language used for month names.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
}

impl Locale {
    /// Name of a one-indexed month, or `None` outside `1..=12`.
    pub fn month_name(self, month: u8) -> Option<&'static str> {
        let names = match self {
            Locale::En => &MONTHS_EN,
            Locale::Pt => &MONTHS_PT,
        };

        names.get(usize::from(month).checked_sub(1)?).copied()
    }
}

/// Format a birthday as `"5 March"`.
pub fn format_birth_date(day: u8, month: u8, locale: Locale) -> String {
    match locale.month_name(month) {
        Some(name) => format!("{day} {name}"),
        None => format!("{day}/{month}"),
    }
}
