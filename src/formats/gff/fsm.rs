//! Parser state machine.
//!
//! The whole GFF3 grammar lives in [`transition`]: for every
//! `(State, TokenKind)` pair it names the next state and the [`Action`] to
//! run. [`advance`] combines the lookup with the action and sends any action
//! failure to [`State::Error`].
//!
//! # States
//!
//! - `Begin`: start of the stream, only `##gff-version` or EOF is valid
//! - `Version`/`VersionNl`: version string, then its newline
//! - `Region`/`RegionNl`: region payload, then its newline
//! - `FeatSource` .. `FeatAttrs`, `FeatNl`: columns 2-9 of a feature, then
//!   its newline (column 1 is read by the `Pause` transition)
//! - `Pause`: between records
//! - `End`: clean end of an empty stream (terminal)
//! - `Error`: trap after any failure (terminal)

use crate::formats::gff::actions::Action;
use crate::formats::gff::element::{ElementKind, FeatureColumn, Record};
use crate::formats::gff::token::{Token, TokenKind};
use crate::formats::primitives::Diagnostic;
use log::trace;
use std::fmt;

/// Parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    /// Start of stream
    #[default]
    Begin,
    /// After `##gff-version`
    Version,
    /// After the version string
    VersionNl,
    /// After `##sequence-region`
    Region,
    /// After the region payload
    RegionNl,
    /// Expecting column 2
    FeatSource,
    /// Expecting column 3
    FeatType,
    /// Expecting column 4
    FeatStart,
    /// Expecting column 5
    FeatEnd,
    /// Expecting column 6
    FeatScore,
    /// Expecting column 7
    FeatStrand,
    /// Expecting column 8
    FeatPhase,
    /// Expecting column 9
    FeatAttrs,
    /// Expecting the end of a feature line
    FeatNl,
    /// Between records
    Pause,
    /// End of stream
    End,
    /// Error trap
    Error,
}

impl State {
    /// All states, in declaration order.
    pub const ALL: [State; 17] = [
        State::Begin,
        State::Version,
        State::VersionNl,
        State::Region,
        State::RegionNl,
        State::FeatSource,
        State::FeatType,
        State::FeatStart,
        State::FeatEnd,
        State::FeatScore,
        State::FeatStrand,
        State::FeatPhase,
        State::FeatAttrs,
        State::FeatNl,
        State::Pause,
        State::End,
        State::Error,
    ];

    /// Upper-case state name, e.g. `FEAT_SOURCE`.
    pub const fn name(self) -> &'static str {
        match self {
            State::Begin => "BEGIN",
            State::Version => "VERSION",
            State::VersionNl => "VERSION_NL",
            State::Region => "REGION",
            State::RegionNl => "REGION_NL",
            State::FeatSource => "FEAT_SOURCE",
            State::FeatType => "FEAT_TYPE",
            State::FeatStart => "FEAT_START",
            State::FeatEnd => "FEAT_END",
            State::FeatScore => "FEAT_SCORE",
            State::FeatStrand => "FEAT_STRAND",
            State::FeatPhase => "FEAT_PHASE",
            State::FeatAttrs => "FEAT_ATTRS",
            State::FeatNl => "FEAT_NL",
            State::Pause => "PAUSE",
            State::End => "END",
            State::Error => "ERROR",
        }
    }

    /// Returns `true` for `End` and `Error`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, State::End | State::Error)
    }

    /// Feature column read in this state and the state that follows it.
    const fn feature_step(self) -> Option<(FeatureColumn, State)> {
        match self {
            State::FeatSource => Some((FeatureColumn::Source, State::FeatType)),
            State::FeatType => Some((FeatureColumn::Type, State::FeatStart)),
            State::FeatStart => Some((FeatureColumn::Start, State::FeatEnd)),
            State::FeatEnd => Some((FeatureColumn::End, State::FeatScore)),
            State::FeatScore => Some((FeatureColumn::Score, State::FeatStrand)),
            State::FeatStrand => Some((FeatureColumn::Strand, State::FeatPhase)),
            State::FeatPhase => Some((FeatureColumn::Phase, State::FeatAttrs)),
            State::FeatAttrs => Some((FeatureColumn::Attributes, State::FeatNl)),
            _ => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One cell of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State entered if the action succeeds
    pub next: State,
    /// Action run on the token
    pub action: Action,
}

const fn to(next: State, action: Action) -> Transition {
    Transition { next, action }
}

const fn fail(action: Action) -> Transition {
    to(State::Error, action)
}

/// Looks up the transition for `kind` in `state`.
///
/// # Examples
///
/// ```
/// use biogff::formats::gff::{transition, Action, State, TokenKind};
///
/// let t = transition(State::Begin, TokenKind::Version);
/// assert_eq!(t.next, State::Version);
/// assert_eq!(t.action, Action::Nop);
/// ```
pub const fn transition(state: State, kind: TokenKind) -> Transition {
    use TokenKind as K;

    match state {
        State::Begin => match kind {
            K::Newline => fail(Action::UnexpectedNewline),
            K::Pragma => fail(Action::UnexpectedPragma),
            K::Version => to(State::Version, Action::Nop),
            K::Region => fail(Action::UnexpectedRegion),
            K::Word => fail(Action::UnexpectedToken),
            K::Eof => to(State::End, Action::Nop),
        },
        State::Version => match kind {
            K::Word => to(State::VersionNl, Action::ReadVersion),
            _ => unexpected(kind),
        },
        State::VersionNl => match kind {
            K::Newline => to(State::Pause, Action::Finish(ElementKind::Version)),
            K::Word => fail(Action::UnexpectedToken),
            _ => unexpected(kind),
        },
        State::Region => match kind {
            K::Word => to(State::RegionNl, Action::ReadRegion),
            _ => unexpected(kind),
        },
        State::RegionNl => match kind {
            K::Newline => to(State::Pause, Action::Finish(ElementKind::Region)),
            K::Word => fail(Action::UnexpectedToken),
            _ => unexpected(kind),
        },
        State::FeatSource
        | State::FeatType
        | State::FeatStart
        | State::FeatEnd
        | State::FeatScore
        | State::FeatStrand
        | State::FeatPhase
        | State::FeatAttrs => match (kind, state.feature_step()) {
            (K::Word, Some((column, next))) => to(next, Action::ReadFeature(column)),
            _ => unexpected(kind),
        },
        State::FeatNl => match kind {
            K::Newline => to(State::Pause, Action::Finish(ElementKind::Feature)),
            K::Word => fail(Action::UnexpectedToken),
            _ => unexpected(kind),
        },
        State::Pause => match kind {
            K::Region => to(State::Region, Action::Nop),
            K::Word => to(State::FeatSource, Action::ReadFeature(FeatureColumn::Seqid)),
            _ => unexpected(kind),
        },
        State::End => match kind {
            K::Newline => fail(Action::UnexpectedNewline),
            K::Pragma => fail(Action::UnexpectedId),
            K::Version => fail(Action::UnexpectedVersion),
            K::Region => fail(Action::UnexpectedRegion),
            K::Word => fail(Action::UnexpectedToken),
            K::Eof => to(State::End, Action::Nop),
        },
        State::Error => match kind {
            K::Version => fail(Action::UnexpectedVersion),
            K::Region => fail(Action::UnexpectedRegion),
            K::Newline | K::Pragma | K::Word | K::Eof => to(State::Error, Action::Nop),
        },
    }
}

/// Default rejection for a token kind outside `Begin`, `End` and `Error`.
const fn unexpected(kind: TokenKind) -> Transition {
    match kind {
        TokenKind::Newline => fail(Action::UnexpectedNewline),
        TokenKind::Pragma => fail(Action::UnexpectedPragma),
        TokenKind::Version => fail(Action::UnexpectedVersion),
        TokenKind::Region => fail(Action::UnexpectedRegion),
        TokenKind::Word => fail(Action::UnexpectedToken),
        TokenKind::Eof => fail(Action::UnexpectedEof),
    }
}

/// Runs one step of the state machine.
///
/// Returns the table's next state, or the action's [`Diagnostic`]. On `Err`
/// the machine is in [`State::Error`], whatever the table's target was.
///
/// # Examples
///
/// ```
/// use biogff::formats::gff::{advance, Record, State, Token, TokenKind};
///
/// let mut record = Record::new();
/// let token = Token::new(TokenKind::Eof, "", 5);
///
/// // End of input right after a record is rejected by the table
/// let diag = advance(State::Pause, &token, &mut record).unwrap_err();
/// assert_eq!(diag.message, "unexpected end-of-file");
/// assert_eq!(diag.line, 5);
/// ```
pub fn advance(state: State, token: &Token<'_>, record: &mut Record) -> Result<State, Diagnostic> {
    let Transition { next, action } = transition(state, token.kind);
    trace!(
        "line {}: {} --{}/{:?}--> {}",
        token.line,
        state,
        token.kind,
        action,
        next
    );
    action.apply(token, record)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(state: State, kind: TokenKind, text: &str) -> Result<State, Diagnostic> {
        let mut record = Record::new();
        advance(state, &Token::new(kind, text, 1), &mut record)
    }

    #[test]
    fn test_state_names() {
        assert_eq!(State::Begin.name(), "BEGIN");
        assert_eq!(State::FeatSource.to_string(), "FEAT_SOURCE");
        assert_eq!(State::FeatNl.name(), "FEAT_NL");
        assert_eq!(State::Error.name(), "ERROR");
    }

    #[test]
    fn test_every_failure_targets_error() {
        for state in State::ALL {
            for kind in TokenKind::ALL {
                let t = transition(state, kind);
                let rejects = matches!(
                    t.action,
                    Action::UnexpectedEof
                        | Action::UnexpectedToken
                        | Action::UnexpectedPragma
                        | Action::UnexpectedVersion
                        | Action::UnexpectedRegion
                        | Action::UnexpectedId
                        | Action::UnexpectedNewline
                );
                if rejects {
                    assert_eq!(t.next, State::Error, "{} x {}", state, kind);
                }
            }
        }
    }

    #[test]
    fn test_begin() {
        assert_eq!(step(State::Begin, TokenKind::Version, "##gff-version"), Ok(State::Version));
        assert_eq!(step(State::Begin, TokenKind::Eof, ""), Ok(State::End));
        assert_eq!(
            step(State::Begin, TokenKind::Word, "chr1").unwrap_err().message,
            "unexpected token"
        );
        assert_eq!(
            step(State::Begin, TokenKind::Region, "##sequence-region")
                .unwrap_err()
                .message,
            "unexpected region directive"
        );
        assert_eq!(
            step(State::Begin, TokenKind::Newline, "").unwrap_err().message,
            "unexpected newline"
        );
        assert_eq!(
            step(State::Begin, TokenKind::Pragma, "##FASTA").unwrap_err().message,
            "unexpected directive"
        );
    }

    #[test]
    fn test_version_then_newline_finishes_version() {
        let mut record = Record::new();
        let state = advance(State::Version, &Token::new(TokenKind::Word, "3", 1), &mut record).unwrap();
        assert_eq!(state, State::VersionNl);
        assert_eq!(record.kind(), ElementKind::Unknown);

        let state = advance(state, &Token::new(TokenKind::Newline, "", 1), &mut record).unwrap();
        assert_eq!(state, State::Pause);
        assert_eq!(record.kind(), ElementKind::Version);
    }

    #[test]
    fn test_version_rejects_second_word() {
        assert_eq!(
            step(State::VersionNl, TokenKind::Word, "extra").unwrap_err().message,
            "unexpected token"
        );
    }

    #[test]
    fn test_pause() {
        assert_eq!(step(State::Pause, TokenKind::Region, "##sequence-region"), Ok(State::Region));
        assert_eq!(step(State::Pause, TokenKind::Word, "chr1"), Ok(State::FeatSource));
        assert_eq!(
            step(State::Pause, TokenKind::Newline, "").unwrap_err().message,
            "unexpected newline"
        );
        assert_eq!(
            step(State::Pause, TokenKind::Version, "##gff-version")
                .unwrap_err()
                .message,
            "unexpected version directive"
        );
    }

    #[test]
    fn test_pause_eof_is_rejected() {
        assert_eq!(
            step(State::Pause, TokenKind::Eof, "").unwrap_err().message,
            "unexpected end-of-file"
        );
    }

    #[test]
    fn test_feature_chain_is_linear() {
        let mut record = Record::new();
        let columns = ["chr1", ".", "gene", "1", "100", ".", "+", ".", "ID=g1"];

        let mut state = State::Pause;
        for text in columns {
            state = advance(state, &Token::new(TokenKind::Word, text, 2), &mut record).unwrap();
        }
        assert_eq!(state, State::FeatNl);

        state = advance(state, &Token::new(TokenKind::Newline, "", 2), &mut record).unwrap();
        assert_eq!(state, State::Pause);
        assert_eq!(record.kind(), ElementKind::Feature);
        assert_eq!(record.feature.columns(), columns);
    }

    #[test]
    fn test_feature_chain_rejects_short_line() {
        for state in [State::FeatSource, State::FeatPhase, State::FeatAttrs] {
            assert_eq!(
                step(state, TokenKind::Newline, "").unwrap_err().message,
                "unexpected newline"
            );
            assert_eq!(
                step(state, TokenKind::Eof, "").unwrap_err().message,
                "unexpected end-of-file"
            );
        }
    }

    #[test]
    fn test_feature_rejects_tenth_column() {
        assert_eq!(
            step(State::FeatNl, TokenKind::Word, "extra").unwrap_err().message,
            "unexpected token"
        );
    }

    #[test]
    fn test_end_eof_is_idempotent() {
        let mut record = Record::new();
        let eof = Token::new(TokenKind::Eof, "", 0);
        let mut state = State::End;
        for _ in 0..5 {
            state = advance(state, &eof, &mut record).unwrap();
            assert_eq!(state, State::End);
        }
    }

    #[test]
    fn test_end_traps_everything_else() {
        let cases = [
            (TokenKind::Newline, "unexpected newline"),
            (TokenKind::Pragma, "unexpected id"),
            (TokenKind::Version, "unexpected version directive"),
            (TokenKind::Region, "unexpected region directive"),
            (TokenKind::Word, "unexpected token"),
        ];
        for (kind, message) in cases {
            assert_eq!(step(State::End, kind, "x").unwrap_err().message, message);
        }
    }

    #[test]
    fn test_error_absorbs_low_value_tokens() {
        for kind in [TokenKind::Newline, TokenKind::Pragma, TokenKind::Word, TokenKind::Eof] {
            assert_eq!(step(State::Error, kind, "x"), Ok(State::Error));
        }
    }

    #[test]
    fn test_error_still_flags_directives() {
        assert_eq!(
            step(State::Error, TokenKind::Version, "##gff-version")
                .unwrap_err()
                .message,
            "unexpected version directive"
        );
        assert_eq!(
            step(State::Error, TokenKind::Region, "##sequence-region")
                .unwrap_err()
                .message,
            "unexpected region directive"
        );
    }

    #[test]
    fn test_action_failure_forces_error_on_valid_transition() {
        // Table says FeatSource -> FeatType, but the word is too long
        let source = "s".repeat(crate::formats::gff::element::FEATURE_SOURCE_SIZE);
        let diag = step(State::FeatSource, TokenKind::Word, &source).unwrap_err();
        assert_eq!(diag.message, "too long source");
    }
}
