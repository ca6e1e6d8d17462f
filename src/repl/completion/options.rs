//! Picocom option catalog
//!
//! Static tables describing picocom's command-line options and the fixed
//! value sets some of them accept.

/// Kind of argument an option expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Plain flag, no argument
    Flag,
    /// Serial line speed
    Baud,
    /// Flow control mode
    Flow,
    /// Parity mode
    Parity,
    /// Number of data bits
    DataBits,
    /// Number of stop bits
    StopBits,
    /// Comma-separated list of mapping names
    MapList,
    /// Path to a file
    File,
    /// External command line
    Command,
    /// Free-form text with nothing to suggest
    Free,
}

impl ArgKind {
    /// Check if this kind consumes an argument
    pub fn takes_value(self) -> bool {
        !matches!(self, ArgKind::Flag)
    }

    /// Fixed value set for this kind, if it has one
    pub fn fixed_values(self) -> Option<&'static [&'static str]> {
        match self {
            ArgKind::Baud => Some(BAUD_RATES),
            ArgKind::Flow => Some(FLOW_MODES),
            ArgKind::Parity => Some(PARITY_MODES),
            ArgKind::DataBits => Some(DATA_BITS),
            ArgKind::StopBits => Some(STOP_BITS),
            _ => None,
        }
    }
}

/// One command-line option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Long form, including the leading `--`
    pub long: &'static str,
    /// Short form, including the leading `-`
    pub short: Option<&'static str>,
    /// Argument expected after the option
    pub arg: ArgKind,
}

const fn opt(long: &'static str, short: Option<&'static str>, arg: ArgKind) -> OptionSpec {
    OptionSpec { long, short, arg }
}

/// All picocom options, in help order
pub const OPTIONS: &[OptionSpec] = &[
    opt("--baud", Some("-b"), ArgKind::Baud),
    opt("--flow", Some("-f"), ArgKind::Flow),
    opt("--parity", Some("-y"), ArgKind::Parity),
    opt("--databits", Some("-d"), ArgKind::DataBits),
    opt("--stopbits", Some("-p"), ArgKind::StopBits),
    opt("--escape", Some("-e"), ArgKind::Free),
    opt("--echo", Some("-c"), ArgKind::Flag),
    opt("--noinit", Some("-i"), ArgKind::Flag),
    opt("--noreset", Some("-r"), ArgKind::Flag),
    opt("--hangup", Some("-u"), ArgKind::Flag),
    opt("--nolock", Some("-l"), ArgKind::Flag),
    opt("--send-cmd", Some("-s"), ArgKind::Command),
    opt("--receive-cmd", Some("-v"), ArgKind::Command),
    opt("--imap", Some("-I"), ArgKind::MapList),
    opt("--omap", Some("-O"), ArgKind::MapList),
    opt("--emap", Some("-E"), ArgKind::MapList),
    opt("--logfile", Some("-g"), ArgKind::File),
    opt("--initstring", Some("-t"), ArgKind::Free),
    opt("--exit-after", Some("-x"), ArgKind::Free),
    opt("--exit", Some("-X"), ArgKind::Flag),
    opt("--lower-rts", None, ArgKind::Flag),
    opt("--raise-rts", None, ArgKind::Flag),
    opt("--lower-dtr", None, ArgKind::Flag),
    opt("--raise-dtr", None, ArgKind::Flag),
    opt("--quiet", Some("-q"), ArgKind::Flag),
    opt("--help", Some("-h"), ArgKind::Flag),
];

/// Standard termios line speeds
pub const BAUD_RATES: &[&str] = &[
    "50", "75", "110", "134", "150", "200", "300", "600", "1200", "1800", "2400", "4800", "9600",
    "19200", "38400", "57600", "115200", "230400", "460800", "500000", "576000", "921600",
    "1000000", "1152000", "1500000", "2000000", "2500000", "3000000", "3500000", "4000000",
];

/// Flow control: xon/xoff, hardware, none
pub const FLOW_MODES: &[&str] = &["x", "h", "n"];

/// Parity: odd, even, none
pub const PARITY_MODES: &[&str] = &["o", "e", "n"];

pub const DATA_BITS: &[&str] = &["5", "6", "7", "8"];

pub const STOP_BITS: &[&str] = &["1", "2"];

/// Character mapping names accepted by `--imap`, `--omap` and `--emap`
pub const MAP_NAMES: &[&str] = &[
    "crlf", "crcrlf", "igncr", "lfcr", "lfcrlf", "ignlf", "delbs", "bsdel", "spchex", "tabhex",
    "crhex", "lfhex", "8bithex", "nrmhex",
];

/// Marks the end of options; later words are operands
pub const END_OF_OPTIONS: &str = "--";

/// Look up an option by its long or short form
pub fn find_option(word: &str) -> Option<&'static OptionSpec> {
    OPTIONS
        .iter()
        .find(|spec| spec.long == word || spec.short == Some(word))
}

/// All option spellings, long form first for each option
pub fn option_names() -> impl Iterator<Item = &'static str> {
    OPTIONS
        .iter()
        .flat_map(|spec| std::iter::once(spec.long).chain(spec.short))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_option_by_long_and_short() {
        assert_eq!(find_option("--baud").map(|o| o.arg), Some(ArgKind::Baud));
        assert_eq!(find_option("-b").map(|o| o.arg), Some(ArgKind::Baud));
        assert_eq!(find_option("-I").map(|o| o.arg), Some(ArgKind::MapList));
        assert!(find_option("--nope").is_none());
    }

    #[test]
    fn test_short_forms_are_unique() {
        let mut shorts: Vec<&str> = OPTIONS.iter().filter_map(|o| o.short).collect();
        let total = shorts.len();
        shorts.sort();
        shorts.dedup();
        assert_eq!(shorts.len(), total);
    }

    #[test]
    fn test_option_names_order() {
        let names: Vec<&str> = option_names().take(4).collect();
        assert_eq!(names, vec!["--baud", "-b", "--flow", "-f"]);
    }

    #[test]
    fn test_fixed_values() {
        assert_eq!(ArgKind::Parity.fixed_values(), Some(PARITY_MODES));
        assert!(ArgKind::MapList.fixed_values().is_none());
        assert!(!ArgKind::Flag.takes_value());
        assert!(ArgKind::Free.takes_value());
    }

    #[test]
    fn test_baud_rates_ascending() {
        let rates: Vec<u32> = BAUD_RATES.iter().map(|r| r.parse().unwrap()).collect();
        assert!(rates.windows(2).all(|w| w[0] < w[1]));
    }
}
