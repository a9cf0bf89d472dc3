use chip8_vm::{
    Chip8, Chip8Error, Chip8Runner, CycleStatus, Fault, FrameBuffer, Program, RunnerConfig,
    STACK_CAPACITY, u4,
};

fn boot(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(FrameBuffer::new(), 42);
    chip8.load(program).expect("program fits in memory");
    chip8
}

fn run_cycles(chip8: &mut Chip8, cycles: usize) {
    for _ in 0..cycles {
        chip8.cycle().expect("cycle succeeds");
    }
}

#[test]
fn load_then_add() {
    // LD V0, 0x0A; ADD V0, 0x05
    let mut chip8 = boot(&[0x60, 0x0A, 0x70, 0x05]);
    run_cycles(&mut chip8, 2);

    assert_eq!(chip8.v()[0], 15);
    assert_eq!(chip8.pc(), 0x200 + 4);
}

#[test]
fn bcd_of_register() {
    // LD V0, 234; LD I, 0x300; LD B, V0
    let mut chip8 = boot(&[0x60, 0xEA, 0xA3, 0x00, 0xF0, 0x33]);
    run_cycles(&mut chip8, 3);

    assert_eq!(chip8.memory().slice(0x300, 3).unwrap(), &[2, 3, 4]);
}

#[test]
fn add_registers_wraps_and_sets_carry() {
    for (a, b) in [(0u8, 0u8), (1, 254), (1, 255), (128, 128), (255, 255), (100, 27)] {
        // LD V1, a; LD V2, b; ADD V1, V2
        let mut chip8 = boot(&[0x61, a, 0x62, b, 0x81, 0x24]);
        run_cycles(&mut chip8, 3);

        let sum = u16::from(a) + u16::from(b);
        assert_eq!(chip8.v()[1], (sum % 256) as u8, "{a} + {b}");
        assert_eq!(chip8.v()[0xF], u8::from(sum > 255), "{a} + {b}");
    }
}

#[test]
fn sub_registers_flags_not_borrow() {
    for (a, b) in [(0u8, 0u8), (5, 3), (3, 5), (0, 255), (255, 0), (200, 200)] {
        // LD V1, a; LD V2, b; SUB V1, V2
        let mut chip8 = boot(&[0x61, a, 0x62, b, 0x81, 0x25]);
        run_cycles(&mut chip8, 3);

        assert_eq!(chip8.v()[1], a.wrapping_sub(b), "{a} - {b}");
        assert_eq!(chip8.v()[0xF], u8::from(a >= b), "{a} - {b}");
    }
}

#[test]
fn shifts_capture_shifted_out_bit() {
    // LD V1, 0x81; SHR V1; LD V2, 0x81; SHL V2
    let mut chip8 = boot(&[0x61, 0x81, 0x81, 0x06, 0x62, 0x81, 0x82, 0x0E]);

    run_cycles(&mut chip8, 2);
    assert_eq!(chip8.v()[1], 0x40);
    assert_eq!(chip8.v()[0xF], 1);

    run_cycles(&mut chip8, 2);
    assert_eq!(chip8.v()[2], 0x02);
    assert_eq!(chip8.v()[0xF], 1);
}

#[test]
fn call_and_return_restore_pc() {
    // 0x200: CALL 0x208
    // 0x202: LD V0, 1
    // 0x204: JP 0x204
    // 0x206: (unused)
    // 0x208: LD V1, 2
    // 0x20A: RET
    let mut chip8 = boot(&[
        0x22, 0x08, 0x60, 0x01, 0x12, 0x04, 0x00, 0x00, 0x61, 0x02, 0x00, 0xEE,
    ]);

    run_cycles(&mut chip8, 1);
    assert_eq!(chip8.pc(), 0x208);
    assert_eq!(chip8.stack().len(), 1);

    run_cycles(&mut chip8, 2);
    assert_eq!(chip8.pc(), 0x202);
    assert!(chip8.stack().is_empty());

    run_cycles(&mut chip8, 1);
    assert_eq!(chip8.v()[0], 1);
    assert_eq!(chip8.v()[1], 2);
}

#[test]
fn seventeenth_nested_call_overflows() {
    // Each subroutine calls the next one, 2 bytes apart
    let program: Vec<u8> = (0..=STACK_CAPACITY as u16)
        .flat_map(|i| (0x2000 | (0x202 + 2 * i)).to_be_bytes())
        .collect();
    let mut chip8 = boot(&program);

    run_cycles(&mut chip8, STACK_CAPACITY);
    assert_eq!(chip8.stack().len(), STACK_CAPACITY);

    let err = chip8.cycle().unwrap_err();
    assert!(matches!(
        err,
        Chip8Error::Execution {
            fault: Fault::StackOverflow,
            ..
        }
    ));
}

#[test]
fn return_on_empty_stack_underflows() {
    let mut chip8 = boot(&[0x00, 0xEE]);
    let err = chip8.cycle().unwrap_err();
    assert_eq!(err.fault(), Some(&Fault::StackUnderflow));
}

#[test]
fn drawing_twice_erases_and_collides() {
    // LD V0, 60; LD V1, 30; LD V2, 0xB; LD F, V2; DRW V0, V1, 5; DRW V0, V1, 5
    let mut chip8 = boot(&[
        0x60, 0x3C, 0x61, 0x1E, 0x62, 0x0B, 0xF2, 0x29, 0xD0, 0x15, 0xD0, 0x15,
    ]);
    run_cycles(&mut chip8, 4);

    assert_eq!(chip8.cycle().unwrap(), CycleStatus::Drew);
    assert_eq!(chip8.v()[0xF], 0);
    let lit = chip8.display().lit_count();
    assert!(lit > 0);
    // Glyph wraps around the bottom-right corner
    assert!(chip8.display().pixel(30, 60));
    assert!(chip8.display().pixel(0, 62));

    assert_eq!(chip8.cycle().unwrap(), CycleStatus::Drew);
    assert_eq!(chip8.v()[0xF], 1);
    assert_eq!(chip8.display().lit_count(), 0);
}

#[test]
fn key_wait_holds_pc_until_pressed() {
    // LD V4, K; ADD V4, 1
    let mut chip8 = boot(&[0xF4, 0x0A, 0x74, 0x01]);

    for _ in 0..10 {
        assert_eq!(chip8.cycle().unwrap(), CycleStatus::Blocked);
        assert_eq!(chip8.pc(), 0x200);
    }

    chip8.set_key(u4::new(0x7), true);
    assert_eq!(chip8.cycle().unwrap(), CycleStatus::Continue);
    assert_eq!(chip8.v()[4], 0x7);
    assert_eq!(chip8.pc(), 0x202);

    run_cycles(&mut chip8, 1);
    assert_eq!(chip8.v()[4], 0x8);
    assert_eq!(chip8.pc(), 0x204);
}

#[test]
fn skip_on_key_state() {
    // LD V0, 5; SKP V0; LD V1, 1; SKNP V0; LD V2, 1
    let program = [0x60, 0x05, 0xE0, 0x9E, 0x61, 0x01, 0xE0, 0xA1, 0x62, 0x01];

    let mut released = boot(&program);
    run_cycles(&mut released, 4);
    assert_eq!(released.v()[1], 1);
    assert_eq!(released.pc(), 0x20A);
    assert_eq!(released.v()[2], 0);

    let mut pressed = boot(&program);
    pressed.set_key(u4::new(5), true);
    run_cycles(&mut pressed, 4);
    assert_eq!(pressed.v()[1], 0);
    assert_eq!(pressed.v()[2], 1);
}

#[test]
fn countdown_with_delay_timer() {
    // LD V0, 2; LD DT, V0; loop: LD V1, DT; SE V1, 0; JP loop; LD V2, 0xAA
    let program = [
        0x60, 0x02, 0xF0, 0x15, 0xF1, 0x07, 0x31, 0x00, 0x12, 0x04, 0x62, 0xAA,
    ];
    let config = RunnerConfig {
        cpu_hz: 600.0,
        timer_hz: 60.0,
    };
    let mut runner = Chip8Runner::with_config(boot(&program), config).unwrap();

    for _ in 0..10 {
        runner.update(1.0 / 60.0).unwrap();
    }
    assert_eq!(runner.chip8_ref().timers().delay, 0);
    assert_eq!(runner.chip8_ref().v()[2], 0xAA);
}

#[test]
fn program_from_file_runs() {
    let dir = std::env::temp_dir().join(format!("chip8-vm-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("add.ch8");
    std::fs::write(&path, [0x60, 0x0A, 0x70, 0x05]).unwrap();

    let program = Program::from_path(&path).unwrap();
    let mut chip8 = boot(program.bytes());
    run_cycles(&mut chip8, 2);
    assert_eq!(chip8.v()[0], 15);

    let err = Program::from_path(dir.join("add.bin")).unwrap_err();
    assert!(matches!(err, Chip8Error::UnsupportedFormat { .. }));

    std::fs::remove_dir_all(&dir).unwrap();
    assert!(!dir.exists());
}

#[test]
fn zero_word_is_stepped_over() {
    // 0x0000; LD V0, 5
    let mut chip8 = boot(&[0x00, 0x00, 0x60, 0x05]);

    assert_eq!(chip8.cycle().unwrap(), CycleStatus::Halted);
    assert_eq!(chip8.cycle().unwrap(), CycleStatus::Continue);
    assert_eq!(chip8.pc(), 0x204);
    assert_eq!(chip8.v()[0], 5);
}

#[test]
fn key_wait_with_several_keys_held() {
    // LD V0, K
    let mut chip8 = boot(&[0xF0, 0x0A]);
    chip8.set_key(u4::new(0x3), true);
    chip8.set_key(u4::new(0xC), true);
    run_cycles(&mut chip8, 1);

    assert_eq!(chip8.v()[0], 0xC);
}
