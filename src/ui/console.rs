//! Console presentation layer
//!
//! Menus, prompts and status screens over any `BufRead`/`Write` pair. Invalid
//! input is re-prompted here and never reaches the engine.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::battle::controller::{BattleObserver, TurnChoice, TurnController};
use crate::battle::engine::{BattleOutcome, TurnReport};
use crate::battle::snapshot::{BattleSnapshot, RobotSnapshot};
use crate::combat::robot::{Archetype, RobotRole};
use crate::core::types::{ActorId, Round};
use crate::ui::state::{EventFeed, FeedCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    AddRobot,
    StartBattle,
    Quit,
}

pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
    feed: EventFeed,
    round: Round,
    pause: bool,
    clear_screen: bool,
    closed: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console on the process's stdin/stdout, clearing the screen between frames
    pub fn stdio(pause: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), pause).with_clear_screen(true)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, pause: bool) -> Self {
        Self {
            input,
            output,
            feed: EventFeed::new(),
            round: 1,
            pause,
            clear_screen: false,
            closed: false,
        }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// True once input reached end-of-file or failed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one trimmed line; `None` at end of input
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Numbered menu; re-prompts until a valid 1-based choice, returns it 0-based
    pub fn choose_from_menu(&mut self, title: &str, options: &[String]) -> io::Result<Option<usize>> {
        loop {
            writeln!(self.output, "\n{}", title)?;
            for (i, option) in options.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, option)?;
            }

            let Some(line) = self.prompt(&format!("\nYour choice (1-{}): ", options.len()))? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(Some(choice - 1)),
                _ => writeln!(self.output, "Invalid choice! Please try again.")?,
            }
        }
    }

    pub fn wait_for_enter(&mut self) -> io::Result<()> {
        if !self.pause {
            return Ok(());
        }
        self.prompt("\nPress ENTER to continue...")?;
        Ok(())
    }

    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    pub fn main_menu(&mut self) -> io::Result<Option<MainMenuChoice>> {
        self.clear()?;
        writeln!(self.output, "=== ROBOT BATTLE SIMULATOR ===")?;
        let options = [
            "Add player robot".to_string(),
            "Start battle".to_string(),
            "Quit".to_string(),
        ];

        Ok(self.choose_from_menu("Main menu:", &options)?.map(|choice| match choice {
            0 => MainMenuChoice::AddRobot,
            1 => MainMenuChoice::StartBattle,
            _ => MainMenuChoice::Quit,
        }))
    }

    /// Ask for a robot name and archetype
    pub fn prompt_new_robot(&mut self) -> io::Result<Option<(String, Archetype)>> {
        let name = loop {
            match self.prompt("Robot name: ")? {
                None => return Ok(None),
                Some(name) if name.is_empty() => writeln!(self.output, "Name cannot be empty!")?,
                Some(name) => break name,
            }
        };

        let options: Vec<String> = Archetype::ALL
            .iter()
            .map(|a| format!("{} ({})", a.name(), a.description()))
            .collect();
        let Some(choice) = self.choose_from_menu("Choose robot type:", &options)? else {
            return Ok(None);
        };

        Ok(Some((name, Archetype::ALL[choice])))
    }

    fn write_robot(&mut self, robot: &RobotSnapshot) -> io::Result<()> {
        let kind = match robot.role {
            RobotRole::Player(archetype) => archetype.name(),
            RobotRole::Boss => "Boss",
        };
        writeln!(self.output, "\nRobot {} ({}):", robot.name, kind)?;
        writeln!(self.output, "  Energy: {}", robot.energy)?;
        writeln!(self.output, "  Armor: {}", robot.armor)?;
        writeln!(self.output, "  Attack: {}", robot.attack)?;

        if !robot.effects.is_empty() {
            let effects: Vec<String> = robot
                .effects
                .iter()
                .map(|e| format!("{} ({})", e.name, e.remaining))
                .collect();
            writeln!(self.output, "  Active effects: {}", effects.join(", "))?;
        }
        Ok(())
    }

    fn write_status(&mut self, snapshot: &BattleSnapshot, next_actor: ActorId) -> io::Result<()> {
        self.clear()?;
        writeln!(self.output, "\n=== ROUND {} ===", snapshot.round)?;
        writeln!(self.output, "\n=== BOSS STATUS ===")?;
        self.write_robot(&snapshot.boss)?;
        writeln!(self.output, "\n=== PLAYER ROBOTS ===")?;
        writeln!(
            self.output,
            "Standing: {}/{}",
            snapshot.living_players().count(),
            snapshot.players.len()
        )?;
        for robot in &snapshot.players {
            self.write_robot(robot)?;
        }

        if !self.feed.is_empty() {
            writeln!(self.output, "\n--- Recent events ---")?;
            let lines: Vec<String> = self
                .feed
                .entries()
                .map(|e| format!("[R{}] {} {}", e.round, e.category.marker(), e.message))
                .collect();
            for line in lines {
                writeln!(self.output, "{}", line)?;
            }
        }

        match next_actor {
            ActorId::Boss => writeln!(self.output, "\n=== BOSS TURN ===")?,
            ActorId::Player(index) => {
                let name = snapshot
                    .players
                    .get(index)
                    .map(|p| p.name.as_str())
                    .unwrap_or("?");
                writeln!(self.output, "\n=== {}'S TURN ===", name)?;
            }
        }
        self.output.flush()
    }

    fn ask_action(&mut self, robot: &RobotSnapshot) -> io::Result<Option<TurnChoice>> {
        let mut options = vec!["Attack".to_string()];
        options.extend(robot.abilities.iter().map(|a| {
            if a.ready {
                a.name.clone()
            } else {
                format!("{} (cooldown {})", a.name, a.cooldown)
            }
        }));
        options.push("Skip turn".to_string());

        let skip_index = options.len() - 1;
        Ok(self
            .choose_from_menu("Choose an action:", &options)?
            .map(|choice| match choice {
                0 => TurnChoice::Attack,
                i if i == skip_index => TurnChoice::Skip,
                i => TurnChoice::Ability(i - 1),
            }))
    }

    fn show_report(&mut self, report: &TurnReport) -> io::Result<()> {
        if let Some(rejection) = &report.rejection {
            writeln!(self.output, "{}", rejection)?;
            self.feed
                .push(self.round, rejection.to_string(), FeedCategory::Rejected);
        }
        for event in &report.events {
            writeln!(self.output, "{}", event)?;
            self.feed
                .push(self.round, event.to_string(), FeedCategory::of(event));
        }
        self.wait_for_enter()
    }

    fn show_outcome(&mut self, outcome: BattleOutcome, snapshot: &BattleSnapshot) -> io::Result<()> {
        writeln!(self.output, "\n{}", outcome)?;
        writeln!(self.output, "Battle lasted {} rounds.", snapshot.round.saturating_sub(1))?;
        self.feed.clear();
        self.round = 1;
        self.wait_for_enter()
    }

    fn io_failed(&mut self, err: io::Error) {
        tracing::warn!(error = %err, "console I/O failed");
        self.closed = true;
    }
}

impl<R: BufRead, W: Write> TurnController for Console<R, W> {
    fn choose_action(&mut self, robot: &RobotSnapshot) -> TurnChoice {
        if self.closed {
            return TurnChoice::Skip;
        }
        match self.ask_action(robot) {
            Ok(Some(choice)) => choice,
            Ok(None) => TurnChoice::Skip,
            Err(err) => {
                self.io_failed(err);
                TurnChoice::Skip
            }
        }
    }
}

impl<R: BufRead, W: Write> BattleObserver for Console<R, W> {
    fn render(&mut self, snapshot: &BattleSnapshot, next_actor: ActorId) {
        if snapshot.round != self.round {
            self.round = snapshot.round;
            self.feed.push(
                self.round,
                format!("Round {} begins", self.round),
                FeedCategory::System,
            );
        }
        if let Err(err) = self.write_status(snapshot, next_actor) {
            self.io_failed(err);
        }
    }

    fn on_turn(&mut self, report: &TurnReport) {
        if let Err(err) = self.show_report(report) {
            self.io_failed(err);
        }
    }

    fn on_finished(&mut self, outcome: BattleOutcome, snapshot: &BattleSnapshot) {
        if let Err(err) = self.show_outcome(outcome, snapshot) {
            self.io_failed(err);
        }
    }
}
