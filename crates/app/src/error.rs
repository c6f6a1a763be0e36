use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AppError {
    #[snafu(display("cannot start the delegated engine on `{stage}`: {source}"))]
    BuildProvider {
        stage: &'static str,
        source: qualifier_llm::ProviderError,
    },
    #[snafu(display("conversation turn failed on `{stage}`: {source}"))]
    Turn {
        stage: &'static str,
        source: qualifier_flow::SessionError,
    },
    #[snafu(display("failed to read user input on `{stage}`: {source}"))]
    ReadInput {
        stage: &'static str,
        source: std::io::Error,
    },
    #[snafu(display("failed to write chat output on `{stage}`: {source}"))]
    WriteOutput {
        stage: &'static str,
        source: std::io::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;
