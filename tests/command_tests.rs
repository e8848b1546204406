// Integration tests for the console command interpreter

use stacktty::debugger::DebugSession;
use stacktty::engine::MockEngineFactory;

const LISTING: &str = "\
i32.const 1
i32.const 2
i32.add
nop
nop
drop
nop
nop
nop
nop
";

fn session() -> DebugSession {
    DebugSession::new(Box::new(MockEngineFactory::new(LISTING)))
}

fn last_output(session: &DebugSession) -> &str {
    session.console.output().last().map(String::as_str).unwrap()
}

#[test]
fn test_commands_echo_with_prompt() {
    let mut session = session();
    session.handle_command("breakls");
    assert_eq!(session.console.output()[0], "> breakls");
}

#[test]
fn test_break_add_list_remove() {
    let mut session = session();
    session.handle_command("break 5");
    session.handle_command("break 2");
    session.handle_command("breakls");
    assert_eq!(last_output(&session), "[2,5]");

    session.handle_command("breakrm 5");
    session.handle_command("breakls");
    assert_eq!(last_output(&session), "[2]");

    session.handle_command("breakrm 2");
    session.handle_command("breakls");
    assert_eq!(last_output(&session), "[]");
}

#[test]
fn test_break_rejects_out_of_range_line() {
    let mut session = session();
    session.handle_command("break 11");
    assert_eq!(last_output(&session), "Breakpoint line number is out of bound");
    assert!(session.breakpoints().is_empty());
}

#[test]
fn test_break_is_idempotent() {
    let mut session = session();
    session.handle_command("break 4");
    session.handle_command("break 4");
    session.handle_command("breakls");
    assert_eq!(last_output(&session), "[4]");
}

#[test]
fn test_breakrm_rejects_non_member_line() {
    let mut session = session();
    session.handle_command("break 3");
    session.handle_command("breakrm 5");
    assert_eq!(last_output(&session), "Breakpoint line number is out of bound");
    session.handle_command("breakls");
    assert_eq!(last_output(&session), "[3]");
}

#[test]
fn test_break_rejects_malformed_numbers() {
    let mut session = session();
    for arg in ["0", "007", "abc", "-1", "2.5"] {
        session.handle_command(&format!("break {}", arg));
        assert_eq!(
            last_output(&session),
            "Error reading the breakpoint offset",
            "argument: {}",
            arg
        );
    }
    assert!(session.breakpoints().is_empty());
}

#[test]
fn test_unknown_verb_and_wrong_arity() {
    let mut session = session();
    session.handle_command("bogus");
    assert_eq!(last_output(&session), "Command 'bogus' not found");
    session.handle_command("step now");
    assert_eq!(last_output(&session), "Command 'step now' not found");
    session.handle_command("break");
    assert_eq!(last_output(&session), "Command 'break' not found");
    session.handle_command("main");
    assert_eq!(last_output(&session), "Command 'main' not found");
}

#[test]
fn test_main_set_and_unknown_function() {
    let mut session = session();
    session.handle_command("main main");
    assert_eq!(last_output(&session), "Program main function set to 'main'");
    session.handle_command("main missing");
    assert_eq!(last_output(&session), "Function 'missing' was not found");
}

#[test]
fn test_step_without_main_reports_failure() {
    let mut session = session();
    session.handle_command("step");
    assert_eq!(last_output(&session), "Cannot execute next instruction");
}

#[test]
fn test_print_empty_stack_is_out_of_bound() {
    let mut session = session();
    session.handle_command("print stack[0].i32");
    assert_eq!(last_output(&session), "Index out of stack bound");
}

#[test]
fn test_print_reads_from_the_top() {
    let mut session = session();
    session.handle_command("main main");
    session.handle_command("step");
    session.handle_command("step");
    session.handle_command("print stack[0].i32");
    assert_eq!(last_output(&session), "i32:2");
    session.handle_command("print stack[1].i32");
    assert_eq!(last_output(&session), "i32:1");
    session.handle_command("print stack[2].i32");
    assert_eq!(last_output(&session), "Index out of stack bound");
}

#[test]
fn test_print_rejects_malformed_targets() {
    let mut session = session();
    for arg in [
        "stack[0]",
        "stack[-1].i32",
        "stack[000000].i32",
        "stack[0].i16",
        "heap[0].i32",
        "stack[].i32",
    ] {
        session.handle_command(&format!("print {}", arg));
        assert_eq!(
            last_output(&session),
            "Please type 'help' for a list of print commands",
            "argument: {}",
            arg
        );
    }
}

#[test]
fn test_print_memo_not_implemented() {
    let mut session = session();
    session.handle_command("print memo[0].i32");
    assert_eq!(last_output(&session), "Not yet implemented");
}

#[test]
fn test_continue_stops_at_breakpoint() {
    let mut session = session();
    session.handle_command("main main");
    session.handle_command("break 5");
    session.handle_command("continue");
    // Line 5 is the second nop: 5 + 5 + 1 + 1 bytes in.
    assert_eq!(session.engine().unwrap().pc_offset(), 12);
    session.handle_command("print stack[0].i32");
    assert_eq!(last_output(&session), "i32:3");
}

#[test]
fn test_continue_to_completion_then_fails() {
    let mut session = session();
    session.handle_command("main main");
    session.handle_command("continue");
    assert!(session
        .console
        .output()
        .iter()
        .any(|line| line == "execution finished"));
    session.handle_command("continue");
    assert_eq!(last_output(&session), "Cannot continue executing instructions");
}

#[test]
fn test_clear_empties_the_log() {
    let mut session = session();
    session.handle_command("help");
    assert!(session.console.output().len() > 1);
    session.handle_command("clear");
    assert!(session.console.output().is_empty());
}

#[test]
fn test_help_lists_every_command() {
    let mut session = session();
    session.handle_command("help");
    let output = session.console.output().join("\n");
    for verb in [
        "help", "clear", "restart", "main", "step", "continue", "break", "breakrm", "breakls",
        "print",
    ] {
        assert!(output.contains(verb), "help is missing '{}'", verb);
    }
}

#[test]
fn test_restart_clears_breakpoints() {
    let mut session = session();
    session.handle_command("break 2");
    session.handle_command("break 7");
    session.handle_command("restart");
    assert!(session.has_engine());
    session.handle_command("breakls");
    assert_eq!(last_output(&session), "[]");
}

#[test]
fn test_trap_output_carries_error_prefix() {
    let mut session = DebugSession::new(Box::new(MockEngineFactory::new("unreachable\n")));
    session.handle_command("main main");
    session.handle_command("step");
    assert!(session
        .console
        .output()
        .iter()
        .any(|line| line == "[ERR] unreachable executed"));
    assert_eq!(last_output(&session), "Cannot execute next instruction");
}
