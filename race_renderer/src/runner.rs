// runner.rs - Fixed-interval tick loop with start/pause/reset/quit commands

use std::io::BufRead;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use maze_race_solver::{Race, StepOutcome, TickReport};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::RaceConfig;
use crate::error_handling::{RaceError, Result};

/// Control input, typed at the terminal or sent by an embedding program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    Quit,
}

impl FromStr for Command {
    type Err = RaceError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "s" | "start" | "resume" => Ok(Command::Start),
            "p" | "pause" => Ok(Command::Pause),
            "r" | "reset" | "new" => Ok(Command::Reset),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Err(RaceError::UnknownCommand {
                input: input.trim().to_string(),
            }),
        }
    }
}

/// What the runner just did, handed to the observer after the race changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    Tick(TickReport),
    Command(Command),
}

/// Drives a `Race` from a periodic timer.
///
/// Only the runner mutates the race; observers get a shared borrow after
/// every change, so a frame never sees a half-applied tick.
pub struct RaceRunner {
    race: Race,
    interval: Duration,
    max_ticks: u64,
}

impl RaceRunner {
    pub fn new(race: Race, config: &RaceConfig) -> Self {
        Self {
            race,
            interval: config.tick_interval(),
            max_ticks: config.max_ticks,
        }
    }

    pub fn race(&self) -> &Race {
        &self.race
    }

    pub fn into_race(self) -> Race {
        self.race
    }

    /// Apply one command. Returns false when the loop should stop.
    pub fn apply(&mut self, command: Command) -> bool {
        debug!("Command {:?} in phase {:?}", command, self.race.phase());
        match command {
            Command::Start => self.race.start(),
            Command::Pause => self.race.pause(),
            Command::Reset => self.race.reset(),
            Command::Quit => return false,
        }
        true
    }

    /// Run until `Quit`, or until the race is over and no more commands can arrive.
    ///
    /// The timer only ticks while the race is running, and restarts its
    /// period whenever the race starts or resumes. A solver running dry
    /// or the tick budget running out ends the loop with an error.
    pub async fn run<F>(&mut self, mut commands: mpsc::Receiver<Command>, mut observer: F) -> Result<()>
    where
        F: FnMut(&Race, RunEvent),
    {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut commands_open = true;

        loop {
            tokio::select! {
                received = commands.recv(), if commands_open => match received {
                    Some(command) => {
                        let was_running = self.race.is_running();
                        let keep_going = self.apply(command);
                        if !was_running && self.race.is_running() {
                            // first tick of a (re)started run is one full interval away
                            ticker.reset();
                        }
                        observer(&self.race, RunEvent::Command(command));
                        if !keep_going {
                            info!("Quit after {} ticks", self.race.ticks());
                            break;
                        }
                    }
                    None => {
                        debug!("Command channel closed");
                        commands_open = false;
                    }
                },
                _ = ticker.tick(), if self.race.is_running() => {
                    let report = self.race.tick();
                    observer(&self.race, RunEvent::Tick(report));
                    self.check_progress(&report)?;
                }
                else => break,
            }
        }
        Ok(())
    }

    /// Start immediately and tick until finished, with no command input.
    pub async fn run_to_finish<F>(&mut self, observer: F) -> Result<()>
    where
        F: FnMut(&Race, RunEvent),
    {
        let (tx, rx) = mpsc::channel(1);
        // capacity 1 and an empty channel: cannot fail
        let _ = tx.try_send(Command::Start);
        drop(tx);
        self.run(rx, observer).await
    }

    fn check_progress(&self, report: &TickReport) -> Result<()> {
        let ticks = self.race.ticks();
        let dry = if report.classic == StepOutcome::Exhausted {
            Some(&self.race.classic().name)
        } else if report.quantum == StepOutcome::Exhausted {
            Some(&self.race.quantum().name)
        } else {
            None
        };
        if let Some(solver) = dry {
            return Err(RaceError::Stalled {
                solver: solver.clone(),
                ticks,
            });
        }
        if self.race.is_running() && ticks >= self.max_ticks {
            return Err(RaceError::TickBudgetExhausted { ticks });
        }
        Ok(())
    }
}

impl std::fmt::Debug for RaceRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaceRunner")
            .field("interval", &self.interval)
            .field("max_ticks", &self.max_ticks)
            .field("race", &self.race)
            .finish()
    }
}

/// Parse commands line by line from `reader` and forward them.
///
/// Blocking: meant for a dedicated OS thread, since a blocked terminal read
/// cannot be cancelled and must not hold up runtime shutdown. Unknown input
/// is logged and skipped. Stops after forwarding `Quit`, at end of input, or
/// once the receiving side has gone away.
pub fn forward_commands<R>(reader: R, tx: mpsc::Sender<Command>) -> Result<()>
where
    R: BufRead,
{
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };
        if tx.blocking_send(command).is_err() || command == Command::Quit {
            break;
        }
    }
    Ok(())
}

/// Forward stdin commands from a detached thread.
pub fn spawn_stdin_commands(tx: mpsc::Sender<Command>) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || {
            if let Err(err) = forward_commands(std::io::stdin().lock(), tx) {
                warn!("Command input stopped: {err}");
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!("s".parse::<Command>().unwrap(), Command::Start);
        assert_eq!(" Pause \n".parse::<Command>().unwrap(), Command::Pause);
        assert_eq!("R".parse::<Command>().unwrap(), Command::Reset);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
        assert!(matches!(
            "jump".parse::<Command>(),
            Err(RaceError::UnknownCommand { input }) if input == "jump"
        ));
    }

    #[test]
    fn test_apply_drives_race_phases() {
        let race = Race::seeded(9, 2).unwrap();
        let mut runner = RaceRunner::new(race, &RaceConfig::default());
        assert!(runner.apply(Command::Start));
        assert!(runner.race().is_running());
        assert!(runner.apply(Command::Pause));
        assert!(!runner.race().is_running());
        assert!(runner.apply(Command::Reset));
        assert_eq!(runner.race().ticks(), 0);
        assert!(!runner.apply(Command::Quit));
    }

    #[test]
    fn test_forward_commands_skips_noise_and_stops_at_quit() {
        let input: &[u8] = b"start\n\nbogus\np\nq\nr\n";
        let (tx, mut rx) = mpsc::channel(8);
        forward_commands(input, tx).unwrap();

        let mut got = Vec::new();
        while let Some(command) = rx.blocking_recv() {
            got.push(command);
        }
        assert_eq!(got, vec![Command::Start, Command::Pause, Command::Quit]);
    }

    #[test]
    fn test_forward_commands_stops_when_receiver_is_gone() {
        let input: &[u8] = b"s\np\ns\n";
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        assert!(forward_commands(input, tx).is_ok());
    }
}
