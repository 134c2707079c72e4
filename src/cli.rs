//! The interactive shell: a thin line-oriented front end over the library's three
//! programmatic surfaces (encode, crack-one, crack-farm). Parsing and help text live
//! here; none of it is part of the cryptanalysis core.

use std::io::{BufRead, Write};

use log::{info, warn};

use crate::enigma::Enigma;
use crate::error::{EnigmaError, EnigmaResult};
use crate::plugboard::Plugboard;
use crate::rotor::{Reflector, ReflectorKind, RotorKind};
use crate::{bombe, bombe_enigma::BombeEnigma, farm, menu::Menu};

const HELP: &str = "\
commands:
  help                          show this message
  set-rotors B|C X Y Z          choose reflector and left/middle/right wheels
  set-steckers AB CD ...        install plugboard pairs (replaces the current board)
  set-rings l m r               set ring offsets (single letters)
  set-rotations l m r           set starting rotations (single letters)
  encode MESSAGE                run MESSAGE through the current machine
  set-check on|off              toggle the Bombe's checking machine for crack/farm-crack
  crack CIPHER CRIB             run the Bombe for the current rotor order only
  farm-crack CIPHER CRIB        run the Bombe across all 60 rotor orders
  enigma                        print the current configuration
  quit                          exit
";

/// Holds the machine configuration the shell commands mutate between calls.
pub struct CliSession {
    rotor_kinds: [RotorKind; 3],
    reflector_kind: ReflectorKind,
    enigma: Enigma,
    check: bool,
}

impl Default for CliSession {
    fn default() -> Self {
        let rotor_kinds = [RotorKind::I, RotorKind::II, RotorKind::III];
        let reflector_kind = ReflectorKind::B;
        Self {
            rotor_kinds,
            reflector_kind,
            enigma: Enigma::from_kinds(rotor_kinds[0], rotor_kinds[1], rotor_kinds[2], reflector_kind),
            check: true,
        }
    }
}

impl CliSession {
    fn rebuild_enigma(&mut self) {
        let plugboard = *self.enigma.plugboard();
        self.enigma = Enigma::from_kinds(self.rotor_kinds[0], self.rotor_kinds[1], self.rotor_kinds[2], self.reflector_kind);
        self.enigma.set_plugboard(plugboard);
    }

    fn configuration_summary(&self) -> String {
        format!(
            "{:?}, {:?}, {:?}, {:?} | rings {} | rotations {} | steckers {} | check {}",
            self.reflector_kind,
            self.rotor_kinds[0],
            self.rotor_kinds[1],
            self.rotor_kinds[2],
            letters3(self.enigma.left().ring_offset(), self.enigma.middle().ring_offset(), self.enigma.right().ring_offset()),
            letters3(self.enigma.left().rotation(), self.enigma.middle().rotation(), self.enigma.right().rotation()),
            self.enigma.plugboard().to_spec_string(),
            self.check,
        )
    }

    /// Parses and executes one command line. Returns `false` when the session
    /// should exit (`quit`).
    pub fn dispatch(&mut self, line: &str, out: &mut impl Write) -> bool {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(c) => c,
            None => return true,
        };
        let rest: Vec<&str> = parts.collect();

        info!("dispatching command: {command}");

        let result = match command {
            "help" => {
                let _ = write!(out, "{HELP}");
                Ok(())
            }
            "quit" => return false,
            "set-rotors" => self.cmd_set_rotors(&rest),
            "set-steckers" => self.cmd_set_steckers(&rest),
            "set-rings" => self.cmd_set_rings(&rest),
            "set-rotations" => self.cmd_set_rotations(&rest),
            "encode" => self.cmd_encode(&rest, out),
            "set-check" => self.cmd_set_check(&rest),
            "crack" => self.cmd_crack(&rest, out),
            "farm-crack" => self.cmd_farm_crack(&rest, out),
            "enigma" => {
                let _ = writeln!(out, "{}", self.configuration_summary());
                Ok(())
            }
            other => Err(EnigmaError::InvalidInput(format!("unknown command: {other}"))),
        };

        if let Err(e) = result {
            warn!("command failed: {e}");
            let _ = writeln!(out, "error: {e}");
        }

        true
    }

    fn cmd_set_rotors(&mut self, args: &[&str]) -> EnigmaResult<()> {
        let [reflector, left, middle, right] = args else {
            return Err(EnigmaError::InvalidInput("usage: set-rotors B|C X Y Z".into()));
        };
        let reflector_kind = ReflectorKind::try_from(*reflector)?;
        let kinds = [RotorKind::try_from(*left)?, RotorKind::try_from(*middle)?, RotorKind::try_from(*right)?];
        if kinds[0] == kinds[1] || kinds[0] == kinds[2] || kinds[1] == kinds[2] {
            return Err(EnigmaError::InvalidInput("the three rotors must be distinct".into()));
        }
        self.rotor_kinds = kinds;
        self.reflector_kind = reflector_kind;
        self.rebuild_enigma();
        Ok(())
    }

    fn cmd_set_steckers(&mut self, args: &[&str]) -> EnigmaResult<()> {
        let plugboard = Plugboard::parse(&args.join(" "))?;
        self.enigma.set_plugboard(plugboard);
        Ok(())
    }

    fn cmd_set_rings(&mut self, args: &[&str]) -> EnigmaResult<()> {
        let [l, m, r] = parse_letter_triple(args)?;
        self.enigma.set_ring_offsets(l, m, r);
        Ok(())
    }

    fn cmd_set_rotations(&mut self, args: &[&str]) -> EnigmaResult<()> {
        let [l, m, r] = parse_letter_triple(args)?;
        self.enigma.set_rotations(l, m, r);
        Ok(())
    }

    fn cmd_encode(&mut self, args: &[&str], out: &mut impl Write) -> EnigmaResult<()> {
        if args.is_empty() {
            return Err(EnigmaError::InvalidInput("usage: encode MESSAGE".into()));
        }
        let message = args.join(" ");
        let ciphertext = self.enigma.encode(&message)?;
        let _ = writeln!(out, "{ciphertext}");
        Ok(())
    }

    fn cmd_set_check(&mut self, args: &[&str]) -> EnigmaResult<()> {
        let [value] = args else {
            return Err(EnigmaError::InvalidInput("usage: set-check on|off".into()));
        };
        self.check = match *value {
            "on" => true,
            "off" => false,
            other => return Err(EnigmaError::InvalidInput(format!("expected on or off, got {other}"))),
        };
        Ok(())
    }

    fn cmd_crack(&mut self, args: &[&str], out: &mut impl Write) -> EnigmaResult<()> {
        let [cipher, crib] = args else {
            return Err(EnigmaError::InvalidInput("usage: crack CIPHER CRIB".into()));
        };
        let menu = Menu::build(cipher, crib)?;
        let reflector = Reflector::new(self.reflector_kind);
        let scrambler = BombeEnigma::build(
            &crate::rotor::Rotor::new(self.rotor_kinds[0], 0, 0),
            &crate::rotor::Rotor::new(self.rotor_kinds[1], 0, 0),
            &crate::rotor::Rotor::new(self.rotor_kinds[2], 0, 0),
            &reflector,
        );
        let stops = bombe::Bombe::new(&menu, scrambler, self.check).run_sweep();
        for stop in &stops {
            let _ = writeln!(out, "{} | {}", stop.indicator, stop.plugboard.to_spec_string());
        }
        info!("crack produced {} stop(s)", stops.len());
        Ok(())
    }

    fn cmd_farm_crack(&mut self, args: &[&str], out: &mut impl Write) -> EnigmaResult<()> {
        let [cipher, crib] = args else {
            return Err(EnigmaError::InvalidInput("usage: farm-crack CIPHER CRIB".into()));
        };
        let stops = farm::run(cipher, crib, self.check)?;
        for stop in &stops {
            let _ = writeln!(out, "{} | {} | {}", stop.stop.indicator, stop.stop.plugboard.to_spec_string(), stop.configuration);
        }
        info!("farm-crack produced {} stop(s)", stops.len());
        Ok(())
    }
}

fn parse_letter_triple(args: &[&str]) -> EnigmaResult<[u8; 3]> {
    let [l, m, r] = args else {
        return Err(EnigmaError::InvalidInput("expected three single letters".into()));
    };
    let mut letter = |s: &str| -> EnigmaResult<u8> {
        let mut chars = s.chars();
        let c = chars.next().ok_or_else(|| EnigmaError::InvalidInput("expected a single letter".into()))?;
        if chars.next().is_some() {
            return Err(EnigmaError::InvalidInput(format!("expected a single letter, got {s}")));
        }
        crate::alphabet::index_of(c)
    };
    Ok([letter(l)?, letter(m)?, letter(r)?])
}

fn letters3(a: u8, b: u8, c: u8) -> String {
    [a, b, c].iter().map(|&i| crate::alphabet::letter_at(i)).collect()
}

/// Runs the REPL until `quit` or end-of-input, reading from `input` and writing
/// prompts/output to `output`.
pub fn run_repl(input: impl BufRead, mut output: impl Write) {
    let mut session = CliSession::default();
    let mut lines = input.lines();
    loop {
        let _ = write!(output, "> ");
        let _ = output.flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(_)) | None => break,
        };
        if !session.dispatch(&line, &mut output) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_round_trips_through_dispatch() {
        let mut session = CliSession::default();
        let mut out = Vec::new();
        assert!(session.dispatch("encode hello", &mut out));
        let output = String::from_utf8(out).unwrap();
        assert!(output.trim().chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn unknown_command_reports_error_but_keeps_running() {
        let mut session = CliSession::default();
        let mut out = Vec::new();
        assert!(session.dispatch("frobnicate", &mut out));
        assert!(String::from_utf8(out).unwrap().starts_with("error:"));
    }

    #[test]
    fn quit_stops_the_session() {
        let mut session = CliSession::default();
        let mut out = Vec::new();
        assert!(!session.dispatch("quit", &mut out));
    }

    #[test]
    fn set_rotors_rejects_duplicate_wheels() {
        let mut session = CliSession::default();
        let mut out = Vec::new();
        assert!(session.dispatch("set-rotors B I I III", &mut out));
        assert!(String::from_utf8(out).unwrap().starts_with("error:"));
    }

    #[test]
    fn set_check_toggles_the_checking_machine_flag() {
        let mut session = CliSession::default();
        assert!(session.check);

        let mut out = Vec::new();
        assert!(session.dispatch("set-check off", &mut out));
        assert!(!session.check);
        assert!(String::from_utf8(out).unwrap().is_empty());

        let mut out = Vec::new();
        assert!(session.dispatch("set-check on", &mut out));
        assert!(session.check);
        assert!(String::from_utf8(out).unwrap().is_empty());
    }

    #[test]
    fn set_check_rejects_invalid_value() {
        let mut session = CliSession::default();
        let mut out = Vec::new();
        assert!(session.dispatch("set-check maybe", &mut out));
        assert!(String::from_utf8(out).unwrap().starts_with("error:"));
    }
}
