use std::io;

use gemini_probe::{logging, Client, Report, STORY_START_PROMPT};

fn main() -> Result<(), gemini_probe::Error> {
    logging::init_tracing();

    let client = Client::new_from_environment()?;
    tracing::info!(model = client.endpoint().model(), "probing story format");

    let mut report = Report::new(io::stdout().lock());
    gemini_probe::run(&client, STORY_START_PROMPT, &mut report)
}
