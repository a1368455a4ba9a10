use proptest::prelude::*;
use sop::{np, Choice, Shapes, I, P0, P1, P2, P3, SOP};

/// Simple lexer token, converted by hand to and from its generic representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(i64),
    Ident(String),
    Pair(char, bool),
    Eof,
}

/// One field list per constructor, in declaration order.
pub type TokenCode = Shapes![Shapes![i64], Shapes![String], Shapes![char, bool], Shapes![]];

impl Token {
    pub fn arity(&self) -> usize {
        match self {
            Token::Literal(_) | Token::Ident(_) => 1,
            Token::Pair(_, _) => 2,
            Token::Eof => 0,
        }
    }

    pub fn constructor(&self) -> usize {
        match self {
            Token::Literal(_) => 0,
            Token::Ident(_) => 1,
            Token::Pair(_, _) => 2,
            Token::Eof => 3,
        }
    }

    pub fn into_sop(self) -> SOP<I, TokenCode> {
        match self {
            Token::Literal(n) => SOP::<I, TokenCode>::inject::<P0>(np![n]),
            Token::Ident(name) => SOP::<I, TokenCode>::inject::<P1>(np![name]),
            Token::Pair(c, b) => SOP::<I, TokenCode>::inject::<P2>(np![c, b]),
            Token::Eof => SOP::<I, TokenCode>::inject::<P3>(np![]),
        }
    }

    pub fn from_sop(sop: SOP<I, TokenCode>) -> Self {
        match sop.split() {
            Choice::Here(fields) => Token::Literal(fields.uncons().0),
            Choice::There(sop) => match sop.split() {
                Choice::Here(fields) => Token::Ident(fields.uncons().0),
                Choice::There(sop) => match sop.split() {
                    Choice::Here(fields) => {
                        let (c, rest) = fields.uncons();
                        Token::Pair(c, rest.uncons().0)
                    }
                    Choice::There(sop) => match sop.split() {
                        Choice::Here(_) => Token::Eof,
                        Choice::There(none) => none.refute(),
                    },
                },
            },
        }
    }
}

pub fn arb_token() -> impl Strategy<Value = Token> {
    prop_oneof![
        any::<i64>().prop_map(Token::Literal),
        "[a-z_][a-z0-9_]{0,7}".prop_map(Token::Ident),
        (any::<char>(), any::<bool>()).prop_map(|(c, b)| Token::Pair(c, b)),
        Just(Token::Eof),
    ]
}
