//! A tiny textual notation for `Command`/`Entity`/`Location`/`Object`,
//! parsed with `nom` purely for writing readable test fixtures — the same
//! role `modus::logic::parser` plays for its own IR ("only for convenience
//! in writing tests"), not a stand-in for the out-of-scope natural-language
//! grammar parser.
//!
//! Grammar (informal):
//! ```text
//! command  := "take" entity | "put" location | "move" entity location
//! entity   := quantifier object
//! object   := size? color? form location?
//! location := relation entity
//! ```
//! e.g. `"take the small white ball"`, `"put inside the yellow box"`,
//! `"move all ball ontop the floor"`.

use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::multispace1;
use nom::combinator::{map, opt, value};
use nom::sequence::{preceded, tuple};
use nom::IResult;

use crate::parsetree::{Command, CommandKind, Entity, FormSpec, Location, Object, Quantifier, RelationSpec};
use crate::world::{Color, Size};

fn ws(input: &str) -> IResult<&str, ()> {
    value((), multispace1)(input)
}

fn quantifier(input: &str) -> IResult<&str, Quantifier> {
    alt((
        value(Quantifier::The, tag("the")),
        value(Quantifier::Any, tag("any")),
        value(Quantifier::All, tag("all")),
    ))(input)
}

fn size(input: &str) -> IResult<&str, Size> {
    alt((value(Size::Small, tag("small")), value(Size::Large, tag("large"))))(input)
}

fn color(input: &str) -> IResult<&str, Color> {
    alt((
        value(Color::Black, tag("black")),
        value(Color::White, tag("white")),
        value(Color::Blue, tag("blue")),
        value(Color::Green, tag("green")),
        value(Color::Yellow, tag("yellow")),
        value(Color::Red, tag("red")),
    ))(input)
}

fn form(input: &str) -> IResult<&str, FormSpec> {
    alt((
        value(FormSpec::Brick, tag("brick")),
        value(FormSpec::Plank, tag("plank")),
        value(FormSpec::Ball, tag("ball")),
        value(FormSpec::Pyramid, tag("pyramid")),
        value(FormSpec::Box, tag("box")),
        value(FormSpec::Table, tag("table")),
        value(FormSpec::Floor, tag("floor")),
        value(FormSpec::Anyform, tag("anyform")),
    ))(input)
}

fn relation(input: &str) -> IResult<&str, RelationSpec> {
    alt((
        value(RelationSpec::Ontop, tag("ontop")),
        value(RelationSpec::Inside, tag("inside")),
        value(RelationSpec::Above, tag("above")),
        value(RelationSpec::Under, tag("under")),
        value(RelationSpec::Leftof, tag("leftof")),
        value(RelationSpec::Rightof, tag("rightof")),
        value(RelationSpec::Beside, tag("beside")),
    ))(input)
}

fn object(input: &str) -> IResult<&str, Object> {
    map(
        tuple((
            opt(preceded(opt(ws), size)),
            opt(preceded(opt(ws), color)),
            preceded(opt(ws), form),
            opt(preceded(ws, location)),
        )),
        |(size, color, form, location)| Object {
            size,
            color,
            form,
            object: None,
            location: location.map(Box::new),
        },
    )(input)
}

fn entity(input: &str) -> IResult<&str, Entity> {
    map(tuple((quantifier, preceded(ws, object))), |(quantifier, object)| Entity {
        quantifier,
        object,
    })(input)
}

fn location(input: &str) -> IResult<&str, Location> {
    map(tuple((relation, preceded(ws, entity))), |(relation, entity)| Location { relation, entity })(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        map(preceded(tuple((tag("take"), ws)), entity), |e| Command {
            command: CommandKind::Take,
            entity: Some(e),
            location: None,
        }),
        map(preceded(tuple((tag("put"), ws)), location), |l| Command {
            command: CommandKind::Put,
            entity: None,
            location: Some(l),
        }),
        map(
            tuple((preceded(tuple((tag("move"), ws)), entity), preceded(ws, location))),
            |(e, l)| Command {
                command: CommandKind::Move,
                entity: Some(e),
                location: Some(l),
            },
        ),
    ))(input)
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseDslError(pub String);

impl std::fmt::Display for ParseDslError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not parse test fixture: {}", self.0)
    }
}

fn finish<'a, T>(result: IResult<&'a str, T>) -> Result<T, ParseDslError> {
    match result {
        Ok((rest, value)) if rest.trim().is_empty() => Ok(value),
        Ok((rest, _)) => Err(ParseDslError(format!("trailing input: {:?}", rest))),
        Err(e) => Err(ParseDslError(e.to_string())),
    }
}

impl FromStr for Command {
    type Err = ParseDslError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        finish(command(s.trim()))
    }
}

impl FromStr for Entity {
    type Err = ParseDslError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        finish(entity(s.trim()))
    }
}

impl FromStr for Object {
    type Err = ParseDslError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        finish(object(s.trim()))
    }
}

impl FromStr for Location {
    type Err = ParseDslError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        finish(location(s.trim()))
    }
}
