//! Top Level of the sql parsing engine

mod commands;
mod common;

use self::commands::create_table::parse_create_table;
use self::commands::insert::parse_insert;
use self::commands::select::parse_select;

use super::objects::ParseTree;
use common::maybe_take_whitespace;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{all_consuming, opt};
use nom::error::{convert_error, ContextError, ParseError, VerboseError};
use nom::sequence::tuple;
use nom::Finish;
use nom::IResult;
use thiserror::Error;

pub struct SqlParser {}

impl SqlParser {
    pub fn parse(input: &str) -> Result<ParseTree, SqlParserError> {
        match SqlParser::nom_parse::<VerboseError<&str>>(input).finish() {
            Ok((_, cmd)) => Ok(cmd),
            Err(e) => Err(SqlParserError::ParseError(convert_error(input, e))),
        }
    }

    fn nom_parse<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
        input: &'a str,
    ) -> IResult<&'a str, ParseTree, E> {
        let (input, (result, _, _, _)) = all_consuming(tuple((
            alt((parse_create_table, parse_insert, parse_select)),
            maybe_take_whitespace,
            opt(tag(";")),
            maybe_take_whitespace,
        )))(input)?;
        Ok((input, result))
    }
}

#[derive(Debug, Error)]
pub enum SqlParserError {
    #[error("SQL Parse Error {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_dispatch() -> Result<(), Box<dyn std::error::Error>> {
        assert!(matches!(
            SqlParser::parse("create table foo (bar text)")?,
            ParseTree::CreateTable(_)
        ));
        assert!(matches!(
            SqlParser::parse("insert into foo values('baz')")?,
            ParseTree::Insert(_)
        ));
        assert!(matches!(
            SqlParser::parse("select bar from foo;")?,
            ParseTree::Select(_)
        ));
        Ok(())
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(SqlParser::parse("hello world").is_err());
        assert!(SqlParser::parse("select bar from foo trailing garbage").is_err());
        assert!(SqlParser::parse("").is_err());
    }
}
