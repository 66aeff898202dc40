// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Process exit status used when command line arguments are rejected.
pub const EXIT_INVALID_ARGUMENT: i32 = 11;

#[derive(Debug)]
pub enum MultGenError {
    /// The operand width must be at least one bit.
    InvalidWidth(usize),
    /// A column reached the final stage without any entry.
    EmptyColumn { column: usize },
    /// A column reached the final stage with more entries than an adder can
    /// absorb.
    OverfullColumn { column: usize, entries: usize },
    /// Serializing the circuit failed before anything was written.
    Emit(String),
    /// Opening or writing the output artifact failed.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The exhaustive self-check found an input where the circuit does not
    /// compute the product.
    SelfCheck { a: u64, b: u64, got: u64 },
}

impl MultGenError {
    /// Process exit status for this class of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            MultGenError::InvalidWidth(_) => EXIT_INVALID_ARGUMENT,
            MultGenError::Emit(_) | MultGenError::Write { .. } => 21,
            MultGenError::EmptyColumn { .. } => 31,
            MultGenError::OverfullColumn { .. } => 32,
            MultGenError::SelfCheck { .. } => 41,
        }
    }
}

impl std::fmt::Display for MultGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultGenError::InvalidWidth(width) => {
                write!(f, "operand width must be a positive number; got {}", width)
            }
            MultGenError::EmptyColumn { column } => {
                write!(f, "column {} is empty at the final stage", column)
            }
            MultGenError::OverfullColumn { column, entries } => write!(
                f,
                "column {} holds {} entries at the final stage; at most 3 can be combined",
                column, entries
            ),
            MultGenError::Emit(msg) => write!(f, "failed to serialize AIG: {}", msg),
            MultGenError::Write { path, source } => {
                write!(f, "can not write output to '{}': {}", path.display(), source)
            }
            MultGenError::SelfCheck { a, b, got } => write!(
                f,
                "self-check failed: {} * {} evaluated to {}, want {}",
                a,
                b,
                got,
                a * b
            ),
        }
    }
}

impl std::error::Error for MultGenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MultGenError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(MultGenError::InvalidWidth(0).exit_code(), 11);
        assert_eq!(MultGenError::EmptyColumn { column: 3 }.exit_code(), 31);
        assert_eq!(
            MultGenError::OverfullColumn {
                column: 1,
                entries: 4
            }
            .exit_code(),
            32
        );
        let write = MultGenError::Write {
            path: PathBuf::from("/nonexistent/out.aig"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        };
        assert_eq!(write.exit_code(), 21);
        assert!(write.to_string().contains("/nonexistent/out.aig"));
    }
}
