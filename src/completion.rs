//! # Shell Completion Module
//!
//! - Generation of completion scripts for various shells via clap_complete
//! - Enhanced bash and fish scripts that complete song titles for
//!   `generate --include`, by calling the hidden `complete-titles` command on
//!   the catalog already typed on the command line
//!
//! ## Usage
//!
//! ```bash
//! setlist completion bash > ~/.local/share/bash-completion/completions/setlist
//! setlist completion zsh > ~/.config/zsh/completions/_setlist
//! setlist completion-enhanced fish > ~/.config/fish/completions/setlist.fish
//! ```

use crate::catalog::Catalog;
use crate::cli::Shell;
use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};
use std::path::Path;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

const ENHANCED_BASH: &str = r#"#!/bin/bash
# Enhanced setlist completion script with song title completion
# Install with: setlist completion-enhanced bash > ~/.local/share/bash-completion/completions/setlist

# Catalog argument of `generate`: the first bare word after it, skipping
# option values.
_setlist_generate_catalog() {
    local i seen=0
    for ((i = 1; i < cword; i++)); do
        if [[ $seen -eq 0 ]]; then
            [[ "${words[i]}" == "generate" ]] && seen=1
            continue
        fi
        case "${words[i]}" in
            --*=*) ;;
            -*) ((i++)) ;;
            *) printf '%s' "${words[i]}"; return 0 ;;
        esac
    done
}

_setlist_complete_titles() {
    local catalog title
    catalog="$(_setlist_generate_catalog)"
    [[ -f "$catalog" ]] || return 0
    while IFS= read -r title; do
        [[ "$title" == "$cur"* ]] && COMPREPLY+=("$(printf '%q' "$title")")
    done < <(setlist complete-titles "$catalog" 2>/dev/null)
}

_setlist() {
    local cur prev words cword
    _init_completion || return

    case "${prev}" in
        --include|-i)
            _setlist_complete_titles
            return 0
            ;;
        --format|-f)
            COMPREPLY=($(compgen -W "text list json" -- "${cur}"))
            return 0
            ;;
        --output|-o|--config)
            _filedir
            return 0
            ;;
        completion)
            COMPREPLY=($(compgen -W "bash zsh fish power-shell elvish" -- "${cur}"))
            return 0
            ;;
        completion-enhanced)
            COMPREPLY=($(compgen -W "bash fish" -- "${cur}"))
            return 0
            ;;
    esac

    local subcommands="generate active format activate deactivate config completion completion-enhanced help"

    if [[ $cword -eq 1 ]]; then
        COMPREPLY=($(compgen -W "$subcommands --config --help --version" -- "${cur}"))
        return 0
    fi

    case "${words[1]}" in
        generate)
            if [[ "${cur}" == -* ]]; then
                COMPREPLY=($(compgen -W "--set-time --transition-time --og-weight --mood-weight --cluster-size --og-artist --include --seed --format --output --help" -- "${cur}"))
            else
                _filedir csv
            fi
            ;;
        format)
            if [[ "${cur}" == -* ]]; then
                COMPREPLY=($(compgen -W "--output --help" -- "${cur}"))
            else
                _filedir csv
            fi
            ;;
        active|activate|deactivate)
            _filedir csv
            ;;
        config)
            COMPREPLY=($(compgen -W "--init --help" -- "${cur}"))
            ;;
        *)
            COMPREPLY=($(compgen -W "$subcommands" -- "${cur}"))
            ;;
    esac
} &&
complete -F _setlist setlist

# ex: filetype=sh
"#;

const ENHANCED_FISH: &str = r#"# Enhanced setlist completion script for Fish shell with song title completion
# Install with: setlist completion-enhanced fish > ~/.config/fish/completions/setlist.fish

# Catalog argument of `generate`: the first bare word after it, skipping
# option values.
function __setlist_generate_catalog
    set -l seen 0
    set -l skip 0
    for token in (commandline -opc)
        if test $seen -eq 0
            test "$token" = generate; and set seen 1
        else if test $skip -eq 1
            set skip 0
        else if string match -q -- '--*=*' $token
            continue
        else if string match -q -- '-*' $token
            set skip 1
        else
            echo $token
            return
        end
    end
end

function __setlist_complete_titles
    set -l catalog (__setlist_generate_catalog)
    if test -n "$catalog"; and test -f "$catalog"
        setlist complete-titles $catalog 2>/dev/null
    end
end

complete -c setlist -e

# Global options
complete -c setlist -s h -l help -d 'Print help information'
complete -c setlist -s V -l version -d 'Print version information'
complete -c setlist -l config -r -F -d 'Defaults file to use'

# Main commands
complete -c setlist -f -n '__fish_use_subcommand' -a 'generate' -d 'Generate a setlist from a catalog'
complete -c setlist -f -n '__fish_use_subcommand' -a 'active' -d 'List the titles of all active songs'
complete -c setlist -f -n '__fish_use_subcommand' -a 'format' -d 'Rewrite a catalog with all columns present'
complete -c setlist -f -n '__fish_use_subcommand' -a 'activate' -d 'Mark songs active by exact title'
complete -c setlist -f -n '__fish_use_subcommand' -a 'deactivate' -d 'Mark songs inactive by exact title'
complete -c setlist -f -n '__fish_use_subcommand' -a 'config' -d 'Print the generation defaults in effect'
complete -c setlist -f -n '__fish_use_subcommand' -a 'completion' -d 'Generate shell completions'
complete -c setlist -f -n '__fish_use_subcommand' -a 'completion-enhanced' -d 'Generate completions with song titles'

# generate
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -s i -l include -r -a '(__setlist_complete_titles)' -d 'Song title'
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -s t -l set-time -r -d 'Total set length in minutes'
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -l transition-time -r -d 'Minutes reserved for transitions'
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -l og-weight -r -d 'Flat weight for the special artist'
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -l mood-weight -r -d 'Exponent applied to mood'
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -s c -l cluster-size -r -d 'Songs per mood cluster'
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -l og-artist -r -d 'Artist with the flat weight'
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -l seed -r -d 'Seed for a reproducible setlist'
complete -c setlist -f -n '__fish_seen_subcommand_from generate' -s f -l format -r -a 'text list json' -d 'Output format'
complete -c setlist -n '__fish_seen_subcommand_from generate' -s o -l output -r -F -d 'Also write the setlist here'

# format, config
complete -c setlist -n '__fish_seen_subcommand_from format' -s o -l output -r -F -d 'Write here instead'
complete -c setlist -f -n '__fish_seen_subcommand_from config' -l init -d 'Write the built-in defaults'

# completion commands
complete -c setlist -f -n '__fish_seen_subcommand_from completion' -a 'bash zsh fish power-shell elvish'
complete -c setlist -f -n '__fish_seen_subcommand_from completion-enhanced' -a 'bash fish'
"#;

/// The enhanced completion script for `shell`, if one exists.
#[must_use]
pub fn enhanced_completion_script(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some(ENHANCED_BASH),
        Shell::Fish => Some(ENHANCED_FISH),
        Shell::Zsh | Shell::PowerShell | Shell::Elvish => None,
    }
}

/// Active titles from `catalog`, sorted and deduplicated.
///
/// An unreadable catalog yields no completions rather than an error, so a
/// half-typed path never breaks the shell.
#[must_use]
pub fn get_title_completions(catalog: &Path) -> Vec<String> {
    let Ok(catalog) = Catalog::load(catalog) else {
        return Vec::new();
    };

    let mut titles: Vec<String> = catalog.active_titles().into_iter().map(str::to_string).collect();
    titles.sort();
    titles.dedup();
    titles
}

/// Print active titles, one per line, unquoted.
///
/// The enhanced scripts do their own escaping.
pub fn print_title_completions(catalog: &Path) -> Result<()> {
    let mut out = io::stdout().lock();
    for title in get_title_completions(catalog) {
        writeln!(out, "{title}")?;
    }
    Ok(())
}
