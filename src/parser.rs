//! Recursive-descent parser from policy text to [`PolicyDocument`].
//!
//! Grammar of the accepted subset:
//!
//! ```text
//! policy    := effect "(" scope(principal) "," scope(action) "," scope(resource) ")" condition* ";"?
//! effect    := "permit" | "forbid"
//! scope(r)  := r [ op operand ]
//! op        := "==" | "!=" | "in" | "not" "in"
//! operand   := entity | "[" entity { "," entity } "]"
//! entity    := IDENT "::" STRING
//! condition := ("when" | "unless") "{" BODY "}" ";"?
//! ```
//!
//! Scopes are read positionally; a role keyword with no operator means the
//! position is unconstrained. `==` and `!=` take a single entity; `in` and
//! `not in` take a single entity or a bracketed list. `not in` is rejected in
//! the action position.

use tracing::debug;

use crate::error::{LexError, ParseError, ValidationError};
use crate::lexer::{Token, TokenKind, tokenize};
use crate::types::{
    Condition, ConditionKind, Effect, EntityRef, PolicyDocument, Role, Scope, ScopeOperator,
};

const EXPECTED_EFFECT: &str = "'permit' or 'forbid'";
const EXPECTED_ENTITY_TYPE: &str = "entity type";
const EXPECTED_ENTITY_ID: &str = "string literal entity id";
const EXPECTED_PATH_AND_ID: &str = "'::' followed by a string literal entity id";

/// Parse one policy's text into a document carrying `id`.
///
/// The id travels beside the text in the policy store, so it is supplied by
/// the caller. The first error stops the parse; no partial document is built.
///
/// ```rust
/// use cedar_scope_codec::{parse_policy, ScopeOperator};
///
/// let doc = parse_policy("p1", r#"permit(principal == User::"alice", action, resource);"#).unwrap();
/// assert_eq!(doc.principal().operator(), ScopeOperator::Eq);
/// ```
pub fn parse_policy(id: &str, text: &str) -> Result<PolicyDocument, ParseError> {
    debug!(event = "Policy", phase = "Parse", id, length = text.len());

    let result = tokenize(text)
        .map_err(|err| match err {
            LexError::UnterminatedCondition { offset } => {
                ParseError::UnterminatedCondition { offset }
            }
            other => ParseError::Lex(other),
        })
        .and_then(|tokens| Parser::new(tokens).policy(id));

    match &result {
        Ok(document) => debug!(
            event = "Policy",
            phase = "Parsed",
            id,
            effect = %document.effect(),
            conditions = document.conditions().len()
        ),
        Err(err) => debug!(event = "Policy", phase = "Rejected", id, error = %err),
    }
    result
}

fn role_keyword(role: Role) -> TokenKind {
    match role {
        Role::Principal => TokenKind::Principal,
        Role::Action => TokenKind::Action,
        Role::Resource => TokenKind::Resource,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        // `tokenize` always ends the stream with `Eof`, and `advance` never
        // steps past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: token.kind.to_string(),
            offset: token.offset,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn policy(&mut self, id: &str) -> Result<PolicyDocument, ParseError> {
        let effect = match self.peek().kind {
            TokenKind::Permit => Effect::Permit,
            TokenKind::Forbid => Effect::Forbid,
            _ => return Err(self.unexpected(EXPECTED_EFFECT)),
        };
        self.advance();

        self.expect(TokenKind::LParen)?;
        let principal = self.scope(Role::Principal)?;
        self.expect(TokenKind::Comma)?;
        let action = self.scope(Role::Action)?;
        self.expect(TokenKind::Comma)?;
        let resource = self.scope(Role::Resource)?;
        self.expect(TokenKind::RParen)?;

        let conditions = self.conditions()?;
        self.eat(&TokenKind::Semi);
        self.expect(TokenKind::Eof)?;

        Ok(PolicyDocument::new(
            id, effect, principal, action, resource, conditions,
        )?)
    }

    fn scope(&mut self, role: Role) -> Result<Scope, ParseError> {
        self.expect(role_keyword(role))?;

        let op_offset = self.peek().offset;
        let operator = match self.peek().kind {
            TokenKind::EqEq => ScopeOperator::Eq,
            TokenKind::NotEq => ScopeOperator::Neq,
            TokenKind::In => ScopeOperator::In,
            TokenKind::Not => {
                self.advance();
                if !self.check(&TokenKind::In) {
                    return Err(self.unexpected("'in' after 'not'"));
                }
                ScopeOperator::NotIn
            }
            _ => return Ok(Scope::All),
        };
        self.advance();

        if role == Role::Action && operator == ScopeOperator::NotIn {
            return Err(ParseError::UnsupportedOperator {
                role,
                operator,
                offset: op_offset,
                source: ValidationError::UnsupportedActionOperator,
            });
        }

        if matches!(
            self.peek().kind,
            TokenKind::Comma | TokenKind::RParen | TokenKind::Eof
        ) {
            return Err(ParseError::MissingOperand {
                role,
                operator,
                offset: self.peek().offset,
            });
        }

        let scope = match operator {
            ScopeOperator::Eq => Scope::equal(self.entity()?),
            ScopeOperator::Neq => Scope::not_equal(self.entity()?),
            ScopeOperator::In => Scope::is_in(self.entity_or_list(role)?),
            ScopeOperator::NotIn => Scope::not_in(self.entity_or_list(role)?),
            ScopeOperator::All => Scope::All,
        };
        Ok(scope)
    }

    fn entity_or_list(&mut self, role: Role) -> Result<Vec<EntityRef>, ParseError> {
        if !self.eat(&TokenKind::LBracket) {
            return Ok(vec![self.entity()?]);
        }
        if self.check(&TokenKind::RBracket) {
            return Err(ValidationError::EmptyEntityList { role }.into());
        }
        let mut entities = vec![self.entity()?];
        while self.eat(&TokenKind::Comma) {
            entities.push(self.entity()?);
        }
        self.expect(TokenKind::RBracket)?;
        Ok(entities)
    }

    fn entity(&mut self) -> Result<EntityRef, ParseError> {
        let TokenKind::Ident(entity_type) = self.peek().kind.clone() else {
            return Err(self.unexpected(EXPECTED_ENTITY_TYPE));
        };
        self.advance();

        if !self.eat(&TokenKind::PathSep) {
            return Err(self.unexpected(EXPECTED_PATH_AND_ID));
        }
        let TokenKind::Str(entity_id) = self.peek().kind.clone() else {
            return Err(self.unexpected(EXPECTED_ENTITY_ID));
        };
        self.advance();

        Ok(EntityRef::new(entity_type, entity_id)?)
    }

    fn conditions(&mut self) -> Result<Vec<Condition>, ParseError> {
        let mut conditions = Vec::new();
        loop {
            let kind = match self.peek().kind {
                TokenKind::When => ConditionKind::When,
                TokenKind::Unless => ConditionKind::Unless,
                _ => return Ok(conditions),
            };
            self.advance();

            let open = self.expect(TokenKind::LBrace)?;
            let TokenKind::Body(body) = self.peek().kind.clone() else {
                return Err(ParseError::UnterminatedCondition {
                    offset: open.offset,
                });
            };
            self.advance();
            self.expect(TokenKind::RBrace)?;
            self.eat(&TokenKind::Semi);

            conditions.push(Condition::new(kind, body));
        }
    }
}
