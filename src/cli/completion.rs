//! Shell integration for picocomp
//!
//! This module generates the glue that registers `picocomp complete` as the
//! completion function of the target command in bash, zsh and fish, followed
//! by the clap-generated completion script for `picocomp` itself.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{ConfigError, PicocompError, Result};

/// Generate the shell integration script
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
/// * `program` - Command to register completion for
///
/// # Returns
/// * `Result<String>` - Script text or error
pub fn generate_init(shell_name: &str, program: &str) -> Result<String> {
    let shell = parse_shell(shell_name)?;
    let glue = match shell {
        Shell::Bash => bash_glue(program),
        Shell::Zsh => zsh_glue(program),
        Shell::Fish => fish_glue(program),
        _ => {
            return Err(PicocompError::Config(ConfigError::Generic(
                "Unsupported shell. Supported shells: bash, zsh, fish".to_string(),
            )));
        }
    };

    Ok(format!("{}\n{}", self_completion(shell), glue))
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(PicocompError::Config(ConfigError::Generic(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish",
            shell_name
        )))),
    }
}

/// Shell function name derived from the target command
fn function_name(program: &str) -> String {
    let name: String = program
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("_picocomp_{name}")
}

/// clap_complete's script for the picocomp binary
fn self_completion(shell: Shell) -> String {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, "picocomp", &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Bash glue: the first output line carries hints, the rest candidates
fn bash_glue(program: &str) -> String {
    let func = function_name(program);
    format!(
        r#"# Completion for {program} provided by picocomp
{func}() {{
    local out hints hint
    out=$(picocomp complete --format bash -- "${{COMP_LINE:0:COMP_POINT}}" 2>/dev/null) || return
    hints=${{out%%$'\n'*}}
    COMPREPLY=()
    if [[ $out == *$'\n'* ]]; then
        mapfile -t COMPREPLY <<< "${{out#*$'\n'}}"
    fi
    for hint in $hints; do
        case $hint in
            nospace|nosort|default) compopt -o "$hint" ;;
            commands) COMPREPLY+=($(compgen -c -- "${{COMP_WORDS[COMP_CWORD]}}")) ;;
        esac
    done
}}
complete -F {func} {program}
"#
    )
}

/// Zsh glue: candidates replace the text from the reported start offset
fn zsh_glue(program: &str) -> String {
    let func = function_name(program);
    format!(
        r#"# Completion for {program} provided by picocomp
{func}() {{
    local line=${{BUFFER[1,CURSOR]}}
    local -a lines hints opts
    lines=("${{(@f)$(picocomp complete --format bash -- "$line" 2>/dev/null)}}")
    hints=(${{=lines[1]}})
    local start=${{${{(M)hints:#start=*}}#start=}}
    local frag=${{line:${{start:-0}}}}
    if [[ $PREFIX == *"$frag" ]]; then
        IPREFIX+=${{PREFIX%"$frag"}}
        PREFIX=$frag
    fi
    (( ${{hints[(Ie)nospace]}} )) && opts+=(-S '')
    (( ${{hints[(Ie)nosort]}} )) && opts+=(-V {func})
    (( ${{hints[(Ie)commands]}} )) && {{ _command_names; return }}
    if (( ${{#lines}} > 1 )); then
        compadd -Q -U "${{opts[@]}}" -- "${{(@)lines[2,-1]}}"
    elif (( ${{hints[(Ie)default]}} )); then
        _files
    fi
}}
compdef {func} {program}
"#
    )
}

/// Fish glue: candidates are widened to the whole token fish replaces
fn fish_glue(program: &str) -> String {
    let func = function_name(program);
    format!(
        r#"# Completion for {program} provided by picocomp
function {func}
    set -l line (commandline -cp)
    set -l token (commandline -ct)
    set -l out (picocomp complete --format bash -- "$line" 2>/dev/null)
    or return
    set -l hints (string split ' ' -- $out[1])
    set -l start (string replace -f 'start=' '' -- $hints)
    set -l frag (string sub -s (math $start + 1) -- "$line")
    set -l head (string replace -r -- (string escape --style=regex -- "$frag")'$' '' "$token")
    if test (count $out) -gt 1
        printf '%s\n' $head$out[2..-1]
    else if contains -- default $hints
        __fish_complete_path "$token"
    else if contains -- commands $hints
        __fish_complete_command "$token"
    end
end
complete -c {program} -f -a '({func})'
"#
    )
}
