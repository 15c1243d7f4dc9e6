// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

/// Ask the user to confirm a destructive action. Defaults to no.
pub fn confirm(question: &str) -> Result<bool, Box<dyn Error>> {
    let answer = cliclack::confirm(question).initial_value(false).interact()?;
    Ok(answer)
}
