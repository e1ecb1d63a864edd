use super::sanitize::{parse_provider_response, sanitize, SanitizedScorecard};
use crate::error::{FoursomeError, FsResult};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something that can look at a scorecard photo and answer with scorecard JSON
/// (possibly wrapped in prose). Retry and fallback live outside the engine.
pub trait ScoreExtractor {
    fn name(&self) -> &str;
    fn extract(&mut self, image: &[u8], mime: &str) -> FsResult<String>;
}

impl<T: ScoreExtractor + ?Sized> ScoreExtractor for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extract(&mut self, image: &[u8], mime: &str) -> FsResult<String> {
        (**self).extract(image, mime)
    }
}

/// Extract, parse and sanitize in one go.
pub fn read_scorecard<E: ScoreExtractor + ?Sized>(
    provider: &mut E,
    image: &[u8],
    mime: &str,
) -> FsResult<SanitizedScorecard> {
    let text = provider.extract(image, mime)?;
    let card = parse_provider_response(&text)?;
    Ok(sanitize(&card))
}

/// Runs an external program: image bytes on stdin, scorecard JSON on stdout.
/// The MIME type is passed in `FOURSOME_IMAGE_MIME`.
pub struct CommandExtractor {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandExtractor {
    /// Splits a command line on whitespace; the first word is the program.
    pub fn parse(command_line: &str) -> FsResult<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| FoursomeError::Config("empty extractor command".to_string()))?;
        Ok(Self {
            name: program.clone(),
            program,
            args: words.collect(),
        })
    }
}

impl ScoreExtractor for CommandExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&mut self, image: &[u8], mime: &str) -> FsResult<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("FOURSOME_IMAGE_MIME", mime)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin while the child's output is drained, or a chatty child
        // blocks on a full pipe. The child is always waited on.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                match stdin {
                    Some(mut pipe) => pipe.write_all(image),
                    None => Ok(()),
                }
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output?;

        if !output.status.success() {
            return Err(FoursomeError::Extraction(format!(
                "{} exited with {}: {}",
                self.name,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        match written {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("{} stopped reading the image early", self.name);
            }
            Err(e) => return Err(e.into()),
            Ok(()) => {}
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Tries providers in order until one answers. The provider that answered
/// last is tried first on the next call.
pub struct FallbackExtractor {
    providers: Vec<Box<dyn ScoreExtractor>>,
    preferred: Option<usize>,
    retry_delay: Duration,
}

impl FallbackExtractor {
    pub fn new(providers: Vec<Box<dyn ScoreExtractor>>) -> Self {
        Self {
            providers,
            preferred: None,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn preferred(&self) -> Option<&str> {
        self.preferred.map(|i| self.providers[i].name())
    }

    fn attempt_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = self.preferred.into_iter().collect();
        order.extend((0..self.providers.len()).filter(|&i| Some(i) != self.preferred));
        order
    }
}

impl ScoreExtractor for FallbackExtractor {
    fn name(&self) -> &str {
        "fallback"
    }

    fn extract(&mut self, image: &[u8], mime: &str) -> FsResult<String> {
        if self.providers.is_empty() {
            return Err(FoursomeError::Extraction(
                "no extraction providers configured".to_string(),
            ));
        }

        let mut failures = Vec::new();
        for idx in self.attempt_order() {
            let provider = &mut self.providers[idx];
            match provider.extract(image, mime) {
                Ok(text) => {
                    if self.preferred != Some(idx) {
                        info!("Using extraction provider '{}'", provider.name());
                    }
                    self.preferred = Some(idx);
                    return Ok(text);
                }
                Err(e) => {
                    warn!("Extraction provider '{}' failed: {}", provider.name(), e);
                    failures.push(format!("{}: {}", provider.name(), e));
                    if !self.retry_delay.is_zero() {
                        thread::sleep(self.retry_delay);
                    }
                }
            }
        }

        self.preferred = None;
        Err(FoursomeError::Extraction(format!(
            "all {} providers failed ({})",
            failures.len(),
            failures.join("; ")
        )))
    }
}
