use super::*;

#[test]
fn edits_multibyte_text_by_char() {
    let mut input = Input::default();
    for c in "gif✨.png".chars() {
        input.insert_char(c);
    }
    assert_eq!(input.cursor, 8);

    input.move_left();
    input.move_left();
    input.move_left();
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "gif.png");

    input.home();
    input.delete();
    assert_eq!(input.buf, "if.png");
    input.end();
    input.insert_char('!');
    assert_eq!(input.buf, "if.png!");
}

#[test]
fn cursor_stays_in_bounds() {
    let mut input = Input::default();
    input.backspace();
    input.delete();
    input.move_left();
    assert_eq!(input.cursor, 0);

    input.set("ab".to_string());
    input.move_right();
    input.move_right();
    assert_eq!(input.cursor, 2);
}

#[test]
fn history_walks_back_and_forth() {
    let mut input = Input::default();
    input.push_history("a.gif");
    input.push_history("a.gif");
    input.push_history("  ");
    input.push_history("b.gif");
    assert_eq!(input.history, vec!["a.gif", "b.gif"]);

    input.history_up();
    assert_eq!(input.buf, "b.gif");
    input.history_up();
    assert_eq!(input.buf, "a.gif");
    input.history_up();
    assert_eq!(input.buf, "a.gif");

    input.history_down();
    assert_eq!(input.buf, "b.gif");
    input.history_down();
    assert_eq!(input.buf, "");
    assert_eq!(input.history_pos, None);
}
