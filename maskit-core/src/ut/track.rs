// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use chrono;
use colored::*;
use kdam::{Bar, tqdm};

/// A basic progress bar for tracking iterations
pub fn progress_bar(n: usize, desc: &str, verbose: bool) -> Bar {
    if !verbose {
        return tqdm!(disable = true);
    }

    tqdm!(
        total = n,
        force_refresh = false,
        desc = progress_timestamp(desc),
        bar_format =
            "{desc suffix=' '}[{percentage:.0}%] ({rate:.1}/s, eta: {remaining human=true})"
    )
}

/// A standardized timestamp prefix for console messages
pub fn progress_timestamp(desc: &str) -> String {
    let time = chrono::Local::now();
    let time = format!("{} | {}", time.format("%Y-%m-%d"), time.format("%H:%M:%S"));

    format!(
        "{} {} {} {} {} {}",
        "[".bold(),
        time,
        "|".bold(),
        "maskit".truecolor(103, 194, 69).bold(),
        "]".bold(),
        desc,
    )
}

/// Print timestamped statements to console
pub fn progress_log(desc: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("{}", progress_timestamp(desc));
}

/// Print timestamped diagnostics to stderr regardless of verbosity
pub fn progress_warn(desc: &str) {
    eprintln!(
        "{}",
        progress_timestamp(&format!("{} {}", "WARNING:".yellow().bold(), desc))
    );
}

/// Format numbers to readable thousands format
///
/// # Examples
///
/// ```
/// use maskit_core::ut::track::thousands_format;
///
/// assert_eq!(thousands_format(999), "999");
/// assert_eq!(thousands_format(1500), "1500");
/// assert_eq!(thousands_format(1234567), "1,234,567");
/// ```
pub fn thousands_format<T>(number: T) -> String
where
    T: std::fmt::Display,
{
    let number = number.to_string();

    if number.len() <= 4 {
        return number;
    }

    let head = number.len() % 3;
    let mut formatted = String::with_capacity(number.len() + number.len() / 3);

    for (idx, digit) in number.chars().enumerate() {
        if idx != 0 && (idx + 3 - head) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}
