//! ELM327 Protocol Selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// OBD-II bus protocols selectable through `ATSP<n>`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Let the adapter search for a working protocol
    #[default]
    Auto,
    /// SAE J1850 PWM (41.6 kbaud)
    J1850Pwm,
    /// SAE J1850 VPW (10.4 kbaud)
    J1850Vpw,
    /// ISO 9141-2 (5 baud init)
    Iso9141_2,
    /// ISO 14230-4 KWP (5 baud init)
    Iso14230_4Kwp,
    /// ISO 14230-4 KWP (fast init)
    Iso14230_4KwpFast,
    /// ISO 15765-4 CAN (11 bit ID, 500 kbaud)
    Iso15765_4Can11bit500,
    /// ISO 15765-4 CAN (29 bit ID, 500 kbaud)
    Iso15765_4Can29bit500,
    /// ISO 15765-4 CAN (11 bit ID, 250 kbaud)
    Iso15765_4Can11bit250,
    /// ISO 15765-4 CAN (29 bit ID, 250 kbaud)
    Iso15765_4Can29bit250,
}

impl Protocol {
    /// ELM327 protocol number used in `ATSP<n>`
    pub fn number(&self) -> u8 {
        match self {
            Protocol::Auto => 0,
            Protocol::J1850Pwm => 1,
            Protocol::J1850Vpw => 2,
            Protocol::Iso9141_2 => 3,
            Protocol::Iso14230_4Kwp => 4,
            Protocol::Iso14230_4KwpFast => 5,
            Protocol::Iso15765_4Can11bit500 => 6,
            Protocol::Iso15765_4Can29bit500 => 7,
            Protocol::Iso15765_4Can11bit250 => 8,
            Protocol::Iso15765_4Can29bit250 => 9,
        }
    }

    /// The AT command that selects this protocol
    pub fn to_elm_command(&self) -> String {
        format!("ATSP{}", self.number())
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::Auto => "automatic",
            Protocol::J1850Pwm => "SAE J1850 PWM",
            Protocol::J1850Vpw => "SAE J1850 VPW",
            Protocol::Iso9141_2 => "ISO 9141-2",
            Protocol::Iso14230_4Kwp => "ISO 14230-4 KWP",
            Protocol::Iso14230_4KwpFast => "ISO 14230-4 KWP fast",
            Protocol::Iso15765_4Can11bit500 => "ISO 15765-4 CAN 11/500",
            Protocol::Iso15765_4Can29bit500 => "ISO 15765-4 CAN 29/500",
            Protocol::Iso15765_4Can11bit250 => "ISO 15765-4 CAN 11/250",
            Protocol::Iso15765_4Can29bit250 => "ISO 15765-4 CAN 29/250",
        };
        f.write_str(name)
    }
}
