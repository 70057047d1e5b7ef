//! GS1 element strings (application identifier + data pairs).

use serde::{Deserialize, Serialize};

use surgishop_core::ValueObject;

/// FNC1 as transmitted by scanners (ASCII group separator).
const GROUP_SEPARATOR: char = '\u{1d}';

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Field {
    Gtin,
    Lot,
    ProductionDate,
    BestBefore,
    Expiry,
    Serial,
    Count,
    NetWeightKg,
    Quantity,
}

#[derive(Debug, Copy, Clone)]
enum Length {
    Fixed(usize),
    Variable(usize),
}

#[derive(Debug, Copy, Clone)]
struct Ai {
    code: &'static str,
    field: Field,
    length: Length,
    numeric: bool,
}

const AIS: &[Ai] = &[
    Ai { code: "01", field: Field::Gtin, length: Length::Fixed(14), numeric: true },
    Ai { code: "10", field: Field::Lot, length: Length::Variable(20), numeric: false },
    Ai { code: "11", field: Field::ProductionDate, length: Length::Fixed(6), numeric: true },
    Ai { code: "15", field: Field::BestBefore, length: Length::Fixed(6), numeric: true },
    Ai { code: "17", field: Field::Expiry, length: Length::Fixed(6), numeric: true },
    Ai { code: "21", field: Field::Serial, length: Length::Variable(20), numeric: false },
    Ai { code: "30", field: Field::Count, length: Length::Variable(8), numeric: true },
    Ai { code: "310", field: Field::NetWeightKg, length: Length::Fixed(6), numeric: true },
    Ai { code: "37", field: Field::Quantity, length: Length::Variable(8), numeric: true },
];

/// Three-digit identifiers take precedence over two-digit ones.
fn match_ai(chars: &[char]) -> Option<&'static Ai> {
    [3usize, 2].into_iter().find_map(|n| {
        if chars.len() < n {
            return None;
        }
        let code: String = chars[..n].iter().collect();
        AIS.iter().find(|ai| ai.code == code)
    })
}

fn lookup_ai(code: &str) -> Option<&'static Ai> {
    AIS.iter().find(|ai| ai.code == code)
}

/// Fields decoded from one scanned GS1 barcode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gs1Element {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_weight_kg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl ValueObject for Gs1Element {}

impl Gs1Element {
    /// Decode a scanned element string.
    ///
    /// Accepts an optional symbology identifier (`]C1`, `]d2`, ...), FNC1
    /// separators between fields, and the parenthesised human-readable form.
    /// Returns `None` when the input is not a well-formed GS1 element string.
    pub fn parse(raw: &str) -> Option<Self> {
        let input = strip_symbology(raw.trim());
        if input.is_empty() {
            return None;
        }

        if input.starts_with('(') {
            Self::parse_bracketed(input)
        } else {
            Self::parse_raw(input)
        }
    }

    fn parse_raw(input: &str) -> Option<Self> {
        let chars: Vec<char> = input.chars().collect();
        let mut element = Self::default();
        let mut pos = 0;

        while pos < chars.len() {
            if chars[pos] == GROUP_SEPARATOR {
                pos += 1;
                continue;
            }

            let Some(ai) = match_ai(&chars[pos..]) else {
                tracing::debug!(position = pos, "unknown application identifier");
                return None;
            };
            pos += ai.code.len();

            let end = match ai.length {
                Length::Fixed(n) => {
                    if pos + n > chars.len() {
                        tracing::debug!(ai = ai.code, "truncated fixed-length field");
                        return None;
                    }
                    pos + n
                }
                Length::Variable(max) => chars[pos..]
                    .iter()
                    .take(max)
                    .position(|c| *c == GROUP_SEPARATOR)
                    .map(|offset| pos + offset)
                    .unwrap_or_else(|| (pos + max).min(chars.len())),
            };

            let data: String = chars[pos..end].iter().collect();
            element.set(ai, data);
            pos = end;
        }

        Some(element)
    }

    fn parse_bracketed(input: &str) -> Option<Self> {
        let mut element = Self::default();
        let mut rest = input;

        while !rest.is_empty() {
            let after_open = rest.strip_prefix('(')?;
            let close = after_open.find(')')?;
            let ai = lookup_ai(&after_open[..close])?;
            let after_ai = &after_open[close + 1..];

            let data_end = after_ai.find('(').unwrap_or(after_ai.len());
            let data: String = after_ai[..data_end]
                .chars()
                .filter(|c| *c != GROUP_SEPARATOR)
                .collect();

            let valid = match ai.length {
                Length::Fixed(n) => data.chars().count() == n,
                Length::Variable(max) => !data.is_empty() && data.chars().count() <= max,
            };
            if !valid {
                tracing::debug!(ai = ai.code, "field length out of range");
                return None;
            }

            element.set(ai, data);
            rest = &after_ai[data_end..];
        }

        Some(element)
    }

    fn set(&mut self, ai: &Ai, data: String) {
        if ai.numeric && !data.chars().all(|c| c.is_ascii_digit()) {
            // Non-standard labels exist in the field; keep the value as scanned.
            tracing::warn!(ai = ai.code, data = %data, "non-numeric data in numeric field");
        }
        let slot = match ai.field {
            Field::Gtin => &mut self.gtin,
            Field::Lot => &mut self.lot,
            Field::ProductionDate => &mut self.production_date,
            Field::BestBefore => &mut self.best_before,
            Field::Expiry => &mut self.expiry,
            Field::Serial => &mut self.serial,
            Field::Count => &mut self.count,
            Field::NetWeightKg => &mut self.net_weight_kg,
            Field::Quantity => &mut self.quantity,
        };
        *slot = Some(data);
    }

    /// Render as `(01)...(17)...(15)...(11)...(10)...(21)...(37)...`.
    pub fn to_human_readable(&self) -> String {
        [
            ("01", &self.gtin),
            ("17", &self.expiry),
            ("15", &self.best_before),
            ("11", &self.production_date),
            ("10", &self.lot),
            ("21", &self.serial),
            ("37", &self.quantity),
        ]
        .into_iter()
        .filter_map(|(ai, value)| value.as_ref().map(|v| format!("({ai}){v}")))
        .collect()
    }
}

/// Drop a leading `]Xn` symbology identifier.
fn strip_symbology(input: &str) -> &str {
    if input.starts_with(']') && input.len() >= 3 && input.is_char_boundary(3) {
        &input[3..]
    } else {
        input
    }
}

/// Whether the input plausibly starts with a GS1 application identifier.
pub fn is_gs1(input: &str) -> bool {
    let chars: Vec<char> = strip_symbology(input.trim()).chars().collect();
    chars.len() >= 4 && match_ai(&chars).is_some()
}
