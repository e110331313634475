//! Format here: https://www.postgresql.org/docs/current/sql-createtable.html
//! Columns are name, type and an optional nullability clause. Constraints
//! beyond null / not null are not part of this engine.

use crate::engine::objects::{ParseTree, RawColumn, RawCreateTableCommand};

use super::super::common::{
    match_close_paren, match_column_name, match_comma, match_open_paren, maybe_take_whitespace,
    parse_sql_identifier, take_whitespace,
};
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::combinator::{cut, opt, value};
use nom::error::{ContextError, ParseError};
use nom::multi::separated_list1;
use nom::sequence::tuple;
use nom::IResult;

pub(in crate::engine::sql_parser) fn parse_create_table<
    'a,
    E: ParseError<&'a str> + ContextError<&'a str>,
>(
    input: &'a str,
) -> IResult<&'a str, ParseTree, E> {
    let (input, (_, (_, table_name, _, _, provided_columns, _))) = tuple((
        match_create_table,
        cut(tuple((
            take_whitespace,
            parse_sql_identifier,
            maybe_take_whitespace,
            match_open_paren,
            separated_list1(match_comma, parse_column_definition),
            match_close_paren,
        ))),
    ))(input)?;

    let raw_create = RawCreateTableCommand {
        table_name: table_name.to_string(),
        provided_columns,
    };

    Ok((input, ParseTree::CreateTable(raw_create)))
}

fn match_create_table<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (), E> {
    let (input, (_, _, _)) =
        tuple((tag_no_case("create"), take_whitespace, tag_no_case("table")))(input)?;
    Ok((input, ()))
}

fn parse_column_definition<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, RawColumn, E> {
    let (input, (name, sql_type, null, _)) = tuple((
        match_column_name,
        match_column_name,
        opt(alt((
            value(
                false,
                tuple((tag_no_case("not"), take_whitespace, tag_no_case("null"))),
            ),
            value(true, tag_no_case("null")),
        ))),
        maybe_take_whitespace,
    ))(input)?;

    Ok((
        input,
        RawColumn {
            name,
            sql_type,
            null: null.unwrap_or(true),
        },
    ))
}
