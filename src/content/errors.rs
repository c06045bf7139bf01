use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("invalid ad placeholder selector: {0}")]
    Selector(String),

    #[error("unparseable html: {0}")]
    Unparseable(String),

    #[error("node vanished while removing ad placeholders")]
    MissingNode,
}
