use std::str::FromStr;

use tank_engine::Point;
use thiserror::Error;

use super::entity::{EntityKind, EntitySpawn, MAX_ENTITIES};

/// Longest accepted line, in characters, excluding the line break.
pub(crate) const MAX_LINE_LENGTH: usize = 49;
const MAX_ORIENTATION: i32 = 3;
const WALL_HEALTH: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LevelDefinition {
    pub(crate) start: Point,
    pub(crate) node_capacity: usize,
    pub(crate) entities: Vec<EntitySpawn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub(crate) struct LevelParseError {
    /// 1-based; 0 refers to the end of the file.
    pub(crate) line: usize,
    pub(crate) kind: LevelParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum LevelParseErrorKind {
    #[error("unknown directive '{0}'")]
    UnknownDirective(char),
    #[error("directive '{directive}' is missing field '{field}'")]
    MissingField {
        directive: char,
        field: &'static str,
    },
    #[error("field '{field}' is not a base-10 integer: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("directive '{directive}' has an unexpected trailing field '{value}'")]
    TrailingField { directive: char, value: String },
    #[error("orientation {0} is outside 0..=3")]
    OrientationOutOfRange(i32),
    #[error("entity table is full ({capacity} entities)")]
    EntityTableFull { capacity: usize },
    #[error("level has no start ('s') directive")]
    MissingStart,
    #[error("line is {length} characters long, the limit is {}", MAX_LINE_LENGTH)]
    LineTooLong { length: usize },
}

/// Parses level source text. Pure: the same text always yields the same
/// definition, with entities in declaration order.
///
/// ```text
/// s <startX>,<startY>
/// m <maxNodes>
/// w <x>,<y>,<orientation>
/// # comment
/// ```
pub(crate) fn parse_level(source: &str) -> Result<LevelDefinition, LevelParseError> {
    let mut start = None;
    let mut node_capacity = 0;
    let mut entities = Vec::new();

    for (index, raw_line) in source.split('\n').enumerate() {
        let line_number = index + 1;
        let at_line = |kind| LevelParseError {
            line: line_number,
            kind,
        };
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        let length = line.chars().count();
        if length > MAX_LINE_LENGTH {
            return Err(at_line(LevelParseErrorKind::LineTooLong { length }));
        }

        let mut chars = line.chars();
        let Some(directive) = chars.next() else {
            continue;
        };
        // One delimiter character of any kind separates the tag from the fields.
        chars.next();
        let fields = chars.as_str();

        match directive {
            '#' => {}
            's' => {
                let [x, y] = split_fields('s', fields, ["x", "y"]).map_err(at_line)?;
                start = Some(Point::new(
                    parse_number("x", x).map_err(at_line)?,
                    parse_number("y", y).map_err(at_line)?,
                ));
            }
            'm' => {
                let [max_nodes] = split_fields('m', fields, ["max_nodes"]).map_err(at_line)?;
                let max_nodes: u32 = parse_number("max_nodes", max_nodes).map_err(at_line)?;
                node_capacity = max_nodes as usize;
            }
            'w' => {
                let [x, y, orientation] =
                    split_fields('w', fields, ["x", "y", "orientation"]).map_err(at_line)?;
                let x = parse_number("x", x).map_err(at_line)?;
                let y = parse_number("y", y).map_err(at_line)?;
                let orientation: i32 =
                    parse_number("orientation", orientation).map_err(at_line)?;
                if !(0..=MAX_ORIENTATION).contains(&orientation) {
                    return Err(at_line(LevelParseErrorKind::OrientationOutOfRange(
                        orientation,
                    )));
                }
                if entities.len() >= MAX_ENTITIES {
                    return Err(at_line(LevelParseErrorKind::EntityTableFull {
                        capacity: MAX_ENTITIES,
                    }));
                }
                entities.push(EntitySpawn {
                    kind: EntityKind::Wall,
                    health: WALL_HEALTH,
                    can_damage: false,
                    x,
                    y,
                    orientation: orientation as u8,
                });
            }
            other => return Err(at_line(LevelParseErrorKind::UnknownDirective(other))),
        }
    }

    let start = start.ok_or(LevelParseError {
        line: 0,
        kind: LevelParseErrorKind::MissingStart,
    })?;
    Ok(LevelDefinition {
        start,
        node_capacity,
        entities,
    })
}

fn split_fields<'a, const N: usize>(
    directive: char,
    fields: &'a str,
    names: [&'static str; N],
) -> Result<[&'a str; N], LevelParseErrorKind> {
    let mut parts = fields.split(',').map(str::trim);
    let mut values = [""; N];
    for (slot, field) in values.iter_mut().zip(names) {
        match parts.next() {
            Some(value) if !value.is_empty() => *slot = value,
            _ => return Err(LevelParseErrorKind::MissingField { directive, field }),
        }
    }
    if let Some(extra) = parts.next() {
        return Err(LevelParseErrorKind::TrailingField {
            directive,
            value: extra.to_string(),
        });
    }
    Ok(values)
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, LevelParseErrorKind> {
    value
        .parse::<T>()
        .map_err(|_| LevelParseErrorKind::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
