//! Line-oriented text front end.
//!
//! Reads one command per line and answers in the style of the Go Text
//! Protocol: `=` on success, `?` on failure, an optional numeric id echoed
//! back, and a blank line after every response.
//!
//! ## Supported Commands
//!
//! - `name`, `version` - identify the engine
//! - `list_commands`, `known_command <cmd>` - introspection
//! - `play <x> <y>` - move for the active (human) seat; computer replies follow
//! - `genmove` - the evaluator's suggestion for the active seat, not played
//! - `show` - render the board
//! - `score` - scores, limit, active seat, and winner
//! - `restart` - new game with the same configuration
//! - `quit` - exit

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::board::Seat;
use crate::game::{Game, RejectReason, TurnOutcome, TurnReport};
use crate::scheduler::TurnScheduler;

const KNOWN_COMMANDS: &[&str] = &[
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "quit",
    "restart",
    "score",
    "show",
    "version",
];

pub struct ConsoleSession {
    scheduler: TurnScheduler,
    /// Turns applied since the last command, filled by a scheduler observer.
    applied: Rc<RefCell<Vec<TurnReport>>>,
}

impl ConsoleSession {
    pub fn new(mut scheduler: TurnScheduler) -> Self {
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&applied);
        scheduler.subscribe(move |_, report| sink.borrow_mut().push(report.clone()));
        Self { scheduler, applied }
    }

    pub fn game(&self) -> &Game {
        self.scheduler.game()
    }

    /// Let the computer open if it holds the first seat. Returns the moves it made.
    pub fn start(&mut self) -> String {
        self.scheduler.request_computer_turn();
        self.take_applied()
    }

    /// Serve commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id off the front of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "show" => (true, format!("\n{}", self.game().board())),

            "score" => (true, self.describe_score()),

            "genmove" => match self.scheduler.suggest() {
                Some(cell) => {
                    let (x, y) = self.game().board().coord(cell);
                    (true, format!("{x} {y}"))
                }
                None => (false, "no move available".to_string()),
            },

            "restart" => match self.scheduler.restart() {
                Ok(_) => (true, self.take_applied()),
                Err(e) => (false, e.to_string()),
            },

            "play" => self.play(args),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn play(&mut self, args: &[&str]) -> (bool, String) {
        if args.len() < 2 {
            return (false, "missing arguments".to_string());
        }
        let (Ok(x), Ok(y)) = (args[0].parse::<usize>(), args[1].parse::<usize>()) else {
            return (false, "invalid coordinate".to_string());
        };
        let Some(cell) = self.game().cell_at(x, y) else {
            return (false, "off the board".to_string());
        };

        match self.scheduler.human_turn(cell) {
            TurnOutcome::Applied(_) => (true, self.take_applied()),
            TurnOutcome::Rejected(reason) => {
                let message = match reason {
                    RejectReason::Occupied => "illegal move: cell occupied",
                    RejectReason::Concluded => "illegal move: game is over",
                    RejectReason::OutOfBounds => "illegal move: off the board",
                    RejectReason::ComputerTurn => "illegal move: not your turn",
                };
                (false, message.to_string())
            }
        }
    }

    /// Describe the turns applied since the last call, one per line.
    fn take_applied(&mut self) -> String {
        let reports: Vec<TurnReport> = self.applied.borrow_mut().drain(..).collect();
        let board = self.game().board();
        let mut lines = Vec::with_capacity(reports.len());
        for report in &reports {
            let (x, y) = board.coord(report.cell);
            let mut line = format!("{} {x} {y}", report.seat.glyph());
            if !report.captured.is_empty() {
                line.push_str(&format!(" captures {}", report.captured.len()));
            }
            if !report.lost.is_empty() {
                line.push_str(&format!(" loses {}", report.lost.len()));
            }
            if let Some(winner) = report.winner {
                line.push_str(&format!(" wins ({})", self.game().player(winner).name));
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    fn describe_score(&self) -> String {
        let game = self.game();
        let mut s = format!(
            "{} {} {} {} limit {}",
            Seat::First.glyph(),
            game.score(Seat::First),
            Seat::Second.glyph(),
            game.score(Seat::Second),
            game.score_limit()
        );
        match game.winning_player() {
            Some(p) => s.push_str(&format!(" winner {}", p.name)),
            None => s.push_str(&format!(" to move {}", game.current_seat().glyph())),
        }
        s
    }
}
