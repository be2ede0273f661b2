use chip8::{consts, Chip8Error, Processor, ProcessorConfig, StepStatus};
use proptest::prelude::*;

fn boot(program: &[u8]) -> Processor {
    let mut chip8 = Processor::with_config(ProcessorConfig::default().seeded(42));
    chip8.load(program).unwrap();
    chip8
}

fn run(chip8: &mut Processor, steps: usize) -> Vec<StepStatus> {
    (0..steps).map(|_| chip8.step().unwrap()).collect()
}

#[test]
fn draws_font_digit() {
    // V0 = 7; I = font(V0); draw 5 rows at (0, 0); spin
    let mut chip8 = boot(&[0x60, 0x07, 0xF0, 0x29, 0xD0, 0x05, 0x12, 0x06]);
    let status = run(&mut chip8, 3);
    assert_eq!(status[2], StepStatus::RedrawScreen);
    assert!(chip8.display_buffer.take_dirty());

    let frame = chip8.display_buffer.render_text();
    let rows: Vec<&str> = frame.lines().take(5).collect();
    assert_eq!(rows[0].trim_end(), "OOOO");
    assert_eq!(rows[1].trim_end(), "   O");
    assert_eq!(rows[2].trim_end(), "  O");
    assert_eq!(rows[3].trim_end(), " O");
    assert_eq!(rows[4].trim_end(), " O");
    assert_eq!(chip8.registers.flag(), 0);

    // the jump-to-self loop keeps the pc pinned
    run(&mut chip8, 4);
    assert_eq!(chip8.registers.pc(), 0x206);
}

#[test]
fn counts_down_with_delay_timer() {
    // V1 = 3; DT = V1; loop: V2 = DT; if V2 != 0 jump loop; V3 = 0xAA
    let mut chip8 = boot(&[
        0x61, 0x03, // 200
        0xF1, 0x15, // 202
        0xF2, 0x07, // 204
        0x32, 0x00, // 206
        0x12, 0x04, // 208
        0x63, 0xAA, // 20A
    ]);
    run(&mut chip8, 2);
    let mut steps = 0;
    while chip8.registers.pc() != 0x20C {
        chip8.step().unwrap();
        steps += 1;
        if steps % 3 == 0 {
            chip8.tick_timers();
        }
        assert!(steps < 100, "delay loop never finished");
    }
    assert_eq!(chip8.registers.get(3).unwrap(), 0xAA);
    assert_eq!(chip8.timers.delay(), 0);
}

#[test]
fn subroutine_stores_bcd() {
    // I = 0x300; V0 = 157; CALL 0x20A; V5 = 1; JP self; ... sub: LD B, V0; RET
    let mut chip8 = boot(&[
        0xA3, 0x00, // 200
        0x60, 0x9D, // 202
        0x22, 0x0A, // 204
        0x65, 0x01, // 206
        0x12, 0x08, // 208
        0xF0, 0x33, // 20A
        0x00, 0xEE, // 20C
    ]);
    run(&mut chip8, 6);
    assert_eq!(chip8.ram.slice(0x300, 3).unwrap(), &[1, 5, 7]);
    assert_eq!(chip8.registers.get(5).unwrap(), 1);
    assert!(chip8.stack.is_empty());
}

#[test]
fn waits_for_key_then_resumes() {
    let mut chip8 = boot(&[0xF4, 0x0A, 0x65, 0x01]);
    for _ in 0..5 {
        assert_eq!(chip8.step().unwrap(), StepStatus::Waiting);
    }
    assert_eq!(chip8.registers.pc(), 0x200);

    chip8.keyboard_buffer.press(0xE).unwrap();
    assert_eq!(chip8.step().unwrap(), StepStatus::Continue);
    chip8.keyboard_buffer.release(0xE).unwrap();
    assert_eq!(chip8.registers.get(4).unwrap(), 0xE);
    assert_eq!(chip8.registers.pc(), 0x202);
    chip8.step().unwrap();
    assert_eq!(chip8.registers.get(5).unwrap(), 1);
}

#[test]
fn runaway_recursion_overflows() {
    let mut chip8 = boot(&[0x22, 0x00]);
    for _ in 0..consts::STACK_SIZE {
        chip8.step().unwrap();
    }
    assert!(matches!(chip8.step(), Err(Chip8Error::StackOverflow)));
    assert_eq!(chip8.stack.len(), consts::STACK_SIZE);
}

#[test]
fn running_off_the_end_of_memory() {
    let mut chip8 = boot(&[0x1F, 0xFE]);
    chip8.step().unwrap();
    assert_eq!(chip8.registers.pc(), 0xFFE);
    // 0x0000 at 0xFFE is not an instruction
    assert!(matches!(chip8.step(), Err(Chip8Error::UnknownOpcode { .. })));

    let mut chip8 = Processor::with_config(ProcessorConfig::default().skipping_unknown());
    chip8.load(&[0x1F, 0xFE]).unwrap();
    chip8.step().unwrap();
    assert!(matches!(chip8.step(), Ok(StepStatus::Skipped(_))));
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::OutOfBounds { addr: 0x1000 })
    ));
}

proptest! {
    #[test]
    fn add_sets_carry_exactly_on_overflow(a: u8, b: u8) {
        let mut chip8 = boot(&[0x60, a, 0x61, b, 0x80, 0x14]);
        run(&mut chip8, 3);
        prop_assert_eq!(chip8.registers.get(0).unwrap(), a.wrapping_add(b));
        prop_assert_eq!(chip8.registers.flag(), (a as u16 + b as u16 > 0xFF) as u8);
    }

    #[test]
    fn sub_flag_means_no_borrow(a: u8, b: u8) {
        let mut chip8 = boot(&[0x60, a, 0x61, b, 0x80, 0x15]);
        run(&mut chip8, 3);
        prop_assert_eq!(chip8.registers.get(0).unwrap(), a.wrapping_sub(b));
        prop_assert_eq!(chip8.registers.flag(), (a >= b) as u8);
    }

    #[test]
    fn drawing_twice_restores_screen(x in 0u8..=255, y in 0u8..=255, glyph in 0u8..16) {
        // V0 = x; V1 = y; V2 = glyph; I = font(V2); draw; draw
        let mut chip8 = boot(&[0x60, x, 0x61, y, 0x62, glyph, 0xF2, 0x29, 0xD0, 0x15, 0xD0, 0x15]);
        run(&mut chip8, 5);
        prop_assert_eq!(chip8.registers.flag(), 0);
        run(&mut chip8, 1);
        prop_assert_eq!(chip8.registers.flag(), 1);
        prop_assert!(chip8.display_buffer.pixels().iter().all(|p| !p));
    }
}
