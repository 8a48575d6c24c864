use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

use crate::poller::run_poller;
use crate::views::{status_line, Page};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fetch, render, exit.
    Once,
    /// Poll while live until ctrl-c or `q`.
    Poll { interval: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleLive,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" | "resume" => Some(Self::ToggleLive),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub async fn run_page<P, F, Fut, E>(mut page: P, fetch: F, mode: Mode)
where
    P: Page,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<P::Data, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let interval = match mode {
        Mode::Once => {
            let result = fetch().await.map_err(|e| e.to_string());
            apply_logged(&mut page, result);
            println!("{}", page.render());
            return;
        }
        Mode::Poll { interval } => interval,
    };

    let (live_tx, live_rx) = watch::channel(true);
    let (update_tx, mut updates) = mpsc::channel(8);
    let poller = tokio::spawn(run_poller(fetch, interval, live_rx, update_tx));
    let mut commands = spawn_command_reader();

    let mut clock = tokio::time::interval(Duration::from_secs(1));
    let mut live = true;
    let mut countdown = interval.as_secs();
    redraw(&page, live, countdown);

    loop {
        tokio::select! {
            Some(update) = updates.recv() => {
                apply_logged(&mut page, update.result);
                countdown = interval.as_secs();
                redraw(&page, live, countdown);
            }
            Some(command) = commands.recv() => match command {
                Command::ToggleLive => {
                    live = !live;
                    live_tx.send_replace(live);
                    countdown = interval.as_secs();
                    redraw(&page, live, countdown);
                }
                Command::Quit => break,
            },
            _ = clock.tick(), if live => {
                countdown = countdown.saturating_sub(1);
                redraw(&page, live, countdown);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    drop(updates);
    poller.abort();
}

fn apply_logged<P: Page>(page: &mut P, result: Result<P::Data, String>) {
    if let Err(e) = &result {
        tracing::warn!(page = page.title(), error = %e, "fetch failed");
    }
    page.apply(result);
}

fn redraw<P: Page>(page: &P, live: bool, countdown: u64) {
    println!(
        "{CLEAR_SCREEN}{}\n\n{}",
        status_line(live, countdown),
        page.render()
    );
}

/// Lines typed on stdin, parsed into commands. Ends quietly on EOF.
fn spawn_command_reader() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if let Some(command) = Command::parse(&line) {
                if tx.send(command).await.is_err() {
                    break;
                }
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_case_insensitively() {
        assert_eq!(Command::parse("p"), Some(Command::ToggleLive));
        assert_eq!(Command::parse(" P \n"), Some(Command::ToggleLive));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse("refresh"), None);
    }
}
