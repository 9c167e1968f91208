//! Line commands for the interactive keyboard driver.
//!
//! A line is a whitespace separated list of tokens:
//!
//! - `:name` presses a named key (`:shift`, `:del`, `:space`, `:mya-ti-mya-na`, ...)
//! - `#code` presses a raw key code (`#65`, `#-21`, `#0xA4F8`)
//! - `:<` / `:>` swipe to the previous / next language
//! - `:lang=N` picks language N from the language list
//! - `:sel=A..B` selects chars A..B in the text field
//! - `:show`, `:help`, `:quit`
//! - anything else is typed one key per char

use crate::presets::{MYA_NA, MYA_TI, NA_PO};
use anyhow::{anyhow, bail, Context};
use lisu_keyboard_core::{Direction, KeyEventRouter, KeyRole};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Press(i32),
    Type(String),
    Swipe(Direction),
    Language(usize),
    Select(Range<usize>),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
tokens:  :name  press a named key (shift unshift sym abc del enter space lang picker
                mya-ti-mya-na na-po-mya-na)
         #code  press a raw key code (#65, #-21, #0xA4F8)
         :< :>  swipe to previous / next language
         :lang=N  pick language N      :sel=A..B  select chars A..B
         :show  :help  :quit
         other text is typed one key per char";

/// Parse one input line into commands.
///
/// Named keys resolve against the router's configuration, so they follow
/// whatever key codes and compound keys the loaded keyboard defines.
pub fn parse_line(line: &str, router: &KeyEventRouter) -> anyhow::Result<Vec<Command>> {
    line.split_whitespace()
        .map(|token| parse_token(token, router))
        .collect()
}

fn parse_token(token: &str, router: &KeyEventRouter) -> anyhow::Result<Command> {
    if let Some(code) = token.strip_prefix('#') {
        return parse_code(code).map(Command::Press);
    }
    let Some(name) = token.strip_prefix(':') else {
        return Ok(Command::Type(token.to_string()));
    };

    if let Some(index) = name.strip_prefix("lang=") {
        let index: usize = index
            .parse()
            .with_context(|| format!("bad language index '{index}'"))?;
        return Ok(Command::Language(index));
    }
    if let Some(range) = name.strip_prefix("sel=") {
        return parse_range(range).map(Command::Select);
    }

    let command = match name {
        "<" => Command::Swipe(Direction::Backward),
        ">" => Command::Swipe(Direction::Forward),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "mya-ti-mya-na" | "na-po-mya-na" => {
            let (first, second) = if name == "mya-ti-mya-na" {
                (MYA_TI, MYA_NA)
            } else {
                (NA_PO, MYA_NA)
            };
            let code = router
                .composer()
                .trigger_for(first as i32, second as i32)
                .ok_or_else(|| anyhow!("key ':{name}' is not configured"))?;
            Command::Press(code)
        }
        _ => {
            let role = key_role(name).ok_or_else(|| anyhow!("unknown key ':{name}'"))?;
            let code = router
                .codes()
                .code_for(role)
                .ok_or_else(|| anyhow!("key ':{name}' is not configured"))?;
            Command::Press(code)
        }
    };
    Ok(command)
}

fn key_role(name: &str) -> Option<KeyRole> {
    let role = match name {
        "del" | "delete" | "bksp" => KeyRole::Delete,
        "enter" | "done" => KeyRole::Done,
        "shift" => KeyRole::Shift,
        "unshift" => KeyRole::Unshift,
        "sym" | "symbol" | "123" => KeyRole::Symbol,
        "abc" => KeyRole::Abc,
        "space" => KeyRole::Space,
        "lang" => KeyRole::SwitchLanguage,
        "picker" | "ime" => KeyRole::SwitchInputMethod,
        _ => return None,
    };
    Some(role)
}

fn parse_code(text: &str) -> anyhow::Result<i32> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (radix, digits) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if digits.starts_with(['-', '+']) {
        bail!("bad key code '#{text}'");
    }
    // i64 holds the magnitude of i32::MIN
    let magnitude = i64::from_str_radix(digits, radix)
        .with_context(|| format!("bad key code '#{text}'"))?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).with_context(|| format!("key code '#{text}' out of range"))
}

fn parse_range(text: &str) -> anyhow::Result<Range<usize>> {
    let Some((start, end)) = text.split_once("..") else {
        bail!("bad selection '{text}', expected A..B");
    };
    let start: usize = start.parse().with_context(|| format!("bad selection start '{start}'"))?;
    let end: usize = end.parse().with_context(|| format!("bad selection end '{end}'"))?;
    Ok(start..end)
}
