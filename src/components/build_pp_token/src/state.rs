use derive_more::IsVariant;

#[derive(Copy, Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum State {
    LineStart,
    BlockComment,
    LineComment,
    Include,
    IncludeOperand,
    IncludePath { closing: char },
    Extern,
    Number,
    Identifier,
    String,
    Done,
}
