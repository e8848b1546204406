// Integration tests for session lifecycle and console interplay

use stacktty::debugger::DebugSession;
use stacktty::engine::MockEngineFactory;

const LISTING: &str = "\
.memory 32
.data 0 0 hello
i32.const 7
i32.const 8
i32.add
nop
drop
";

fn session() -> DebugSession {
    DebugSession::new(Box::new(MockEngineFactory::new(LISTING)))
}

#[test]
fn test_restart_resets_panel_state() {
    let mut session = session();
    session.memo_index = 3;
    session.memo_byte_start = 160;
    session.code_grid.top_index = 2;
    session.handle_command("break 2");
    session.handle_command("restart");

    assert!(session.has_engine());
    assert_eq!(session.memo_index, 0);
    assert_eq!(session.memo_byte_start, 0);
    assert_eq!(session.code_grid.top_index, 0);
    assert!(session.breakpoints().is_empty());
}

#[test]
fn test_restart_recreates_engine_state() {
    let mut session = session();
    session.handle_command("main main");
    session.handle_command("step");
    assert_eq!(session.engine().unwrap().stack_depth(), 1);

    session.handle_command("restart");
    let engine = session.engine().unwrap();
    assert_eq!(engine.stack_depth(), 0);
    assert!(!engine.main_function_set());
    assert_eq!(engine.pc_offset(), 0);
}

#[test]
fn test_failed_engine_construction_keeps_session_alive() {
    let mut session = DebugSession::new(Box::new(MockEngineFactory::new(";; empty\n")));
    assert!(!session.has_engine());
    // Commands still answer instead of faulting.
    session.handle_command("main main");
    assert_eq!(
        session.console.output().last().map(String::as_str),
        Some("Failed to set 'main' main function")
    );
    session.handle_command("step");
    assert_eq!(
        session.console.output().last().map(String::as_str),
        Some("Cannot execute next instruction")
    );
}

#[test]
fn test_code_lines_mark_breakpoints_and_align_numbers() {
    let mut session = session();
    session.handle_command("break 3");
    let lines = session.code_lines();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], " 1  i32.const 7");
    assert_eq!(lines[2], "> 3  i32.add");
    assert_eq!(lines[4], " 5  drop");
}

#[test]
fn test_code_highlight_follows_pc() {
    let mut session = session();
    session.handle_command("main main");
    session.handle_command("step");
    session.handle_command("step");
    session.code_lines();
    assert_eq!(session.code_grid.highlight_line, 2);
}

#[test]
fn test_empty_submit_reruns_last_command() {
    let mut session = session();
    for c in "breakls".chars() {
        session.console.insert_char(c);
    }
    let line = session.console.submit().unwrap();
    session.handle_command(&line);
    assert_eq!(
        session.console.output().last().map(String::as_str),
        Some("[]")
    );

    // Plain Enter on the empty prompt repeats the previous command.
    let repeated = session.console.submit().unwrap();
    assert_eq!(repeated, "breakls");
    session.handle_command(&repeated);
    assert_eq!(session.console.output().len(), 4);
}

#[test]
fn test_command_output_resets_scroll_to_bottom() {
    let mut session = session();
    session.console.set_output_scroll(0);
    session.handle_command("breakls");
    assert_eq!(session.console.output_scroll(), usize::MAX);
}

#[test]
fn test_memory_survives_until_restart() {
    let mut session = session();
    let engine = session.engine().unwrap();
    assert_eq!(engine.memory_count(), 1);
    assert_eq!(engine.memory_byte(0, 0), Some(b'h'));
    session.handle_command("restart");
    assert_eq!(session.engine().unwrap().memory_byte(0, 4), Some(b'o'));
}
