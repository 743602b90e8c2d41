use super::*;
use crate::error::Error;
use crate::interrupt::{IE_ADDR, IF_ADDR};

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

/// Post-boot CPU with `program` placed at the entry point 0x0100.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);
    (Cpu::new(), bus)
}

fn step(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    cpu.step(bus).expect("step should succeed")
}

#[test]
fn post_boot_registers() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);

    let cpu = Cpu::power_on();
    assert_eq!(cpu.regs, Registers::default());
    assert_eq!(cpu.regs.pc, 0x0000);
}

#[test]
fn nop_advances_pc_and_costs_four() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.instructions_executed(), 1);
}

#[test]
fn ld_immediates_and_register_moves() {
    // LD BC,0x1234 ; LD A,0x42 ; LD D,A ; LD (HL),0x99 with HL=0xC000
    let (mut cpu, mut bus) = setup(&[0x01, 0x34, 0x12, 0x3E, 0x42, 0x57, 0x21, 0x00, 0xC0, 0x36, 0x99]);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x42);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.d(), 0x42);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x99);
    assert_eq!(cpu.regs.pc, 0x010B);
}

#[test]
fn ld_hl_increment_and_decrement() {
    // LD HL,0xC000 ; LD A,0x11 ; LD (HL+),A ; LD (HL-),A ; LD A,(HL-)
    let (mut cpu, mut bus) = setup(&[0x21, 0x00, 0xC0, 0x3E, 0x11, 0x22, 0x32, 0x3A]);
    for _ in 0..3 {
        step(&mut cpu, &mut bus);
    }
    assert_eq!(bus.memory[0xC000], 0x11);
    assert_eq!(cpu.regs.hl(), 0xC001);
    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xC001], 0x11);
    assert_eq!(cpu.regs.hl(), 0xC000);
    bus.memory[0xC000] = 0x77;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x77);
    assert_eq!(cpu.regs.hl(), 0xBFFF);
}

#[test]
fn ldh_uses_high_page() {
    // LDH (0x80),A ; LD C,0x81 ; LD (C),A ; LDH A,(0x82)
    let (mut cpu, mut bus) = setup(&[0xE0, 0x80, 0x0E, 0x81, 0xE2, 0xF0, 0x82]);
    bus.memory[0xFF82] = 0x5A;
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xFF80], 0x01);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xFF81], 0x01);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x5A);
}

#[test]
fn ld_a16_sp_stores_little_endian() {
    let (mut cpu, mut bus) = setup(&[0x08, 0x00, 0xC0]);
    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(bus.memory[0xC000], 0xFE);
    assert_eq!(bus.memory[0xC001], 0xFF);
}

#[test]
fn inc_ff_sets_zero_and_half_and_keeps_carry() {
    // INC A twice from different carry states.
    let (mut cpu, mut bus) = setup(&[0x3C, 0x3C]);
    cpu.regs.set_a(0xFF);
    cpu.regs.set_f(Flags::C | Flags::N);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::H | Flags::C);

    cpu.regs.set_a(0xFF);
    cpu.regs.set_f(Flags::empty());
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::H);
}

#[test]
fn inc_dec_hl_indirect() {
    // LD HL,0xC000 ; INC (HL) ; DEC (HL) ; DEC (HL)
    let (mut cpu, mut bus) = setup(&[0x21, 0x00, 0xC0, 0x34, 0x35, 0x35]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x01);
    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.regs.flag(Flags::Z));
    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xC000], 0xFF);
    assert!(cpu.regs.flag(Flags::H));
    assert!(cpu.regs.flag(Flags::N));
}

#[test]
fn add_a_and_cp_flags() {
    // LD A,0x3A ; ADD A,0xC6 ; CP 0x00 ; CP 0x01
    let (mut cpu, mut bus) = setup(&[0x3E, 0x3A, 0xC6, 0xC6, 0xFE, 0x00, 0xFE, 0x01]);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::H | Flags::C);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x00, "CP must not change A");
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::N);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f(), Flags::N | Flags::H | Flags::C);
}

#[test]
fn adc_uses_carry_and_logic_ops_fix_flags() {
    // ADC A,B ; AND 0x0F ; XOR A ; OR 0x80
    let (mut cpu, mut bus) = setup(&[0x88, 0xE6, 0x0F, 0xAF, 0xF6, 0x80]);
    cpu.regs.set_a(0x0E);
    cpu.regs.set_b(0x01);
    cpu.regs.set_f(Flags::C);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x10);
    assert_eq!(cpu.regs.f(), Flags::H);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::H);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f(), Flags::Z);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x80);
    assert_eq!(cpu.regs.f(), Flags::empty());
}

#[test]
fn add_hl_preserves_zero() {
    // ADD HL,BC
    let (mut cpu, mut bus) = setup(&[0x09]);
    cpu.regs.set_hl(0x8FFF);
    cpu.regs.set_bc(0x8001);
    cpu.regs.set_f(Flags::Z | Flags::N);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::H | Flags::C);
}

#[test]
fn add_sp_and_ld_hl_sp_clear_zero() {
    // ADD SP,-2 ; LD HL,SP+1
    let (mut cpu, mut bus) = setup(&[0xE8, 0xFE, 0xF8, 0x01]);
    cpu.regs.set_f(Flags::Z | Flags::N);
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(cpu.regs.f(), Flags::H | Flags::C);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0xFFFD);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(cpu.regs.f(), Flags::empty());
}

#[test]
fn daa_turns_0x0f_into_bcd_15() {
    let (mut cpu, mut bus) = setup(&[0x27]);
    cpu.regs.set_a(0x0F);
    cpu.regs.set_f(Flags::empty());
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x15);
    assert!(!cpu.regs.flag(Flags::C));
    assert!(!cpu.regs.flag(Flags::H));
}

#[test]
fn daa_after_bcd_add() {
    // LD A,0x45 ; ADD A,0x38 ; DAA -> 0x83
    let (mut cpu, mut bus) = setup(&[0x3E, 0x45, 0xC6, 0x38, 0x27]);
    for _ in 0..3 {
        step(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a(), 0x83);
    assert!(!cpu.regs.flag(Flags::C));
}

#[test]
fn rlca_never_sets_zero_but_cb_rlc_does() {
    // RLCA ; RLC A (CB 07)
    let (mut cpu, mut bus) = setup(&[0x07, 0xCB, 0x07]);
    cpu.regs.set_a(0x00);
    cpu.regs.set_f(Flags::Z);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(!cpu.regs.flag(Flags::Z), "RLCA must clear Z even for a zero result");

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(cpu.regs.flag(Flags::Z), "CB RLC must set Z for a zero result");
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn rlc_wraps_msb() {
    // RLC B
    let (mut cpu, mut bus) = setup(&[0xCB, 0x00]);
    cpu.regs.set_b(0b1000_0001);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b(), 0b0000_0011);
    assert!(cpu.regs.flag(Flags::C));
    assert!(!cpu.regs.flag(Flags::Z));
}

#[test]
fn accumulator_rotates_through_carry() {
    // RLA ; RRA ; RRCA
    let (mut cpu, mut bus) = setup(&[0x17, 0x1F, 0x0F]);
    cpu.regs.set_a(0x80);
    cpu.regs.set_f(Flags::empty());
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(cpu.regs.f(), Flags::C);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x80);
    assert_eq!(cpu.regs.f(), Flags::empty());
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x40);
    assert_eq!(cpu.regs.f(), Flags::empty());
}

#[test]
fn cpl_scf_ccf() {
    let (mut cpu, mut bus) = setup(&[0x2F, 0x37, 0x3F]);
    cpu.regs.set_a(0x35);
    cpu.regs.set_f(Flags::Z);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0xCA);
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::N | Flags::H);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::C);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f(), Flags::Z);
}

#[test]
fn cb_bit_res_set_on_memory() {
    // LD HL,0xC000 ; BIT 7,(HL) ; SET 7,(HL) ; BIT 7,(HL) ; RES 0,(HL)
    let (mut cpu, mut bus) = setup(&[0x21, 0x00, 0xC0, 0xCB, 0x7E, 0xCB, 0xFE, 0xCB, 0x7E, 0xCB, 0x86]);
    bus.memory[0xC000] = 0x01;
    step(&mut cpu, &mut bus);
    cpu.regs.set_f(Flags::C);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.f(), Flags::Z | Flags::H | Flags::C);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x81);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f(), Flags::H | Flags::C);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x80);
}

#[test]
fn cb_swap_and_srl() {
    // SWAP A ; SRL A
    let (mut cpu, mut bus) = setup(&[0xCB, 0x37, 0xCB, 0x3F]);
    cpu.regs.set_a(0x1F);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0xF1);
    assert_eq!(cpu.regs.f(), Flags::empty());
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x78);
    assert_eq!(cpu.regs.f(), Flags::C);
}

#[test]
fn jr_cc_taken_and_not_taken() {
    // JR NZ,+5 with Z set (post-boot F=0xB0): not taken.
    let (mut cpu, mut bus) = setup(&[0x20, 0x05]);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0102);

    // Same instruction with Z clear: taken.
    cpu.regs.pc = 0x0100;
    cpu.regs.set_f(Flags::empty());
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0107);
}

#[test]
fn jr_negative_displacement() {
    // JR -2 loops onto itself.
    let (mut cpu, mut bus) = setup(&[0x18, 0xFE]);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn jp_and_call_cc_costs() {
    // JP Z,0x0200 (taken) ; at 0x0200: CALL NC,0x0300 (not taken, C set)
    let (mut cpu, mut bus) = setup(&[0xCA, 0x00, 0x02]);
    bus.memory[0x0200..0x0203].copy_from_slice(&[0xD4, 0x00, 0x03]);
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0203);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn call_ret_round_trip() {
    // CALL 0x0200 ; at 0x0200: RET
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x02]);
    bus.memory[0x0200] = 0xC9;

    assert_eq!(step(&mut cpu, &mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x01);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn ret_cc_costs() {
    // RET C (taken, C set after boot) then RET NC (not taken).
    let (mut cpu, mut bus) = setup(&[0xD8]);
    bus.memory[0xFFFC] = 0x00;
    bus.memory[0xFFFD] = 0x02;
    bus.memory[0x0200] = 0xD0;
    cpu.regs.sp = 0xFFFC;
    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0201);
}

#[test]
fn rst_pushes_return_address() {
    let (mut cpu, mut bus) = setup(&[0xEF]);
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0101);
}

#[test]
fn pop_af_masks_low_nibble() {
    // LD BC,0x12FF ; PUSH BC ; POP AF
    let (mut cpu, mut bus) = setup(&[0x01, 0xFF, 0x12, 0xC5, 0xF1]);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.af(), 0x12F0);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn jp_hl_and_ld_sp_hl() {
    let (mut cpu, mut bus) = setup(&[0xF9, 0xE9]);
    cpu.regs.set_hl(0xC123);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.sp, 0xC123);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0xC123);
}

#[test]
fn vblank_wins_over_timer() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x05;
    bus.memory[IF_ADDR as usize] = 0x05;

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x04);
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.read16(0xFFFC), 0x0100);
    assert_eq!(cpu.instructions_executed(), 0);
}

#[test]
fn disabled_sources_are_not_serviced() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x02;
    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x01);
}

#[test]
fn ei_takes_effect_after_next_instruction() {
    // EI ; NOP ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
    assert!(cpu.ime_pending());

    // The instruction after EI still runs before any dispatch.
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(cpu.ime);

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0102);
}

#[test]
fn ei_then_di_never_enables_interrupts() {
    // EI ; DI ; NOP ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = 0x1F;

    for expected_pc in [0x0101, 0x0102, 0x0103, 0x0104] {
        assert_eq!(step(&mut cpu, &mut bus), 4);
        assert_eq!(cpu.regs.pc, expected_pc);
        assert!(!cpu.ime);
    }
    assert_eq!(bus.memory[IF_ADDR as usize], 0x1F);
}

#[test]
fn reti_enables_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x34;
    bus.memory[0xFFFD] = 0x12;
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert!(cpu.ime);
}

#[test]
fn halt_idles_until_interrupt_then_dispatches() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x01;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.halted);
    for _ in 0..3 {
        assert_eq!(step(&mut cpu, &mut bus), 4);
        assert!(cpu.halted);
        assert_eq!(cpu.regs.pc, 0x0101);
    }

    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0101);
}

#[test]
fn halt_with_ime_clear_wakes_without_dispatch() {
    // HALT ; INC A
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C]);
    bus.memory[IE_ADDR as usize] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(cpu.halted);
    assert_eq!(step(&mut cpu, &mut bus), 4);

    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a(), 0x02);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x01, "IF is not acknowledged");
}

#[test]
fn halt_bug_executes_next_byte_twice() {
    // HALT ; INC A ; NOP with IME clear and an interrupt already pending.
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x04;
    bus.memory[IF_ADDR as usize] = 0x04;

    step(&mut cpu, &mut bus);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0101);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x02);
    assert_eq!(cpu.regs.pc, 0x0101);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x03);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn halt_bug_reads_operand_from_opcode_address() {
    // HALT ; LD A,0x14 -> the opcode byte 0x3E is also read as the operand.
    let (mut cpu, mut bus) = setup(&[0x76, 0x3E, 0x14]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a(), 0x3E);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn ei_then_halt_with_pending_interrupt() {
    // EI ; HALT ; INC A, handler at 0x0040: LD A,0x42 ; RETI
    let (mut cpu, mut bus) = setup(&[0xFB, 0x76, 0x3C]);
    bus.memory[0x0040..0x0043].copy_from_slice(&[0x3E, 0x42, 0xD9]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert!(cpu.ime);
    assert!(!cpu.halted);

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read16(cpu.regs.sp), 0x0101, "returns to the HALT");

    // The handler runs unaffected.
    step(&mut cpu, &mut bus);
    assert_eq!((cpu.regs.a(), cpu.regs.pc), (0x42, 0x0042));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0101);
    // Nothing pending any more, so the HALT now halts.
    step(&mut cpu, &mut bus);
    assert!(cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.regs.a(), 0x42);
}

#[test]
fn stop_idles_until_an_enabled_interrupt_is_pending() {
    // STOP 0x00 ; INC A
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x3C]);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0102);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.a(), 0x01);

    bus.memory[IE_ADDR as usize] = 0x10;
    bus.memory[IF_ADDR as usize] = 0x10;
    step(&mut cpu, &mut bus);
    assert!(!cpu.is_stopped());
    assert_eq!(cpu.regs.a(), 0x02);
}

#[test]
fn undefined_opcode_locks_the_cpu() {
    let (mut cpu, mut bus) = setup(&[0x00, 0xD3, 0x00]);
    step(&mut cpu, &mut bus);

    assert_eq!(
        cpu.step(&mut bus),
        Err(Error::UndefinedOpcode {
            opcode: 0xD3,
            addr: 0x0101
        })
    );
    assert_eq!(cpu.locked(), Some((0xD3, 0x0101)));
    assert!(cpu.snapshot().locked);

    let regs = cpu.regs;
    assert_eq!(
        cpu.step(&mut bus),
        Err(Error::CpuLocked {
            opcode: 0xD3,
            addr: 0x0101
        })
    );
    assert_eq!(cpu.regs, regs);
    assert_eq!(cpu.instructions_executed(), 1);
}

#[test]
fn every_undefined_opcode_locks() {
    for opcode in [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD] {
        let (mut cpu, mut bus) = setup(&[opcode]);
        assert!(matches!(
            cpu.step(&mut bus),
            Err(Error::UndefinedOpcode { .. })
        ));
    }
}

#[test]
fn decode_at_renders_operands() {
    let mut bus = TestBus::default();
    let program: &[u8] = &[
        0x3E, 0x42, // LD A,d8
        0xC3, 0x50, 0x01, // JP a16
        0x20, 0xFE, // JR NZ,r8
        0xE0, 0x40, // LDH (a8),A
        0xCB, 0x7C, // BIT 7,H
        0xF8, 0x02, // LD HL,SP+r8
        0x00,
    ];
    bus.memory[..program.len()].copy_from_slice(program);

    let ld = Cpu::decode_at(&bus, 0x0000);
    assert_eq!(ld.operand, Operand::Imm8(0x42));
    assert_eq!(ld.length, 2);
    assert_eq!(ld.to_string(), "0000: LD A,$42");

    let jp = Cpu::decode_at(&bus, 0x0002);
    assert_eq!(jp.operand, Operand::Imm16(0x0150));
    assert_eq!(jp.to_string(), "0002: JP $0150");

    assert_eq!(Cpu::decode_at(&bus, 0x0005).to_string(), "0005: JR NZ,-2");
    assert_eq!(Cpu::decode_at(&bus, 0x0007).to_string(), "0007: LDH ($FF40),A");

    assert_eq!(ld.operand.width(), 1);
    assert_eq!(jp.operand.width(), 2);

    let bit = Cpu::decode_at(&bus, 0x0009);
    assert_eq!(bit.operand.width(), 0);
    assert!(bit.prefixed);
    assert_eq!(bit.opcode, 0x7C);
    assert_eq!(bit.operand, Operand::None);
    assert_eq!(bit.to_string(), "0009: BIT 7,H");

    assert_eq!(Cpu::decode_at(&bus, 0x000B).to_string(), "000B: LD HL,SP+2");
    assert_eq!(Cpu::decode_at(&bus, 0x000D).mnemonic, "NOP");
}

#[test]
fn snapshot_matches_registers() {
    let cpu = Cpu::new();
    let snap = cpu.snapshot();
    assert_eq!((snap.a, snap.f, snap.pc, snap.sp), (0x01, 0xB0, 0x0100, 0xFFFE));
    assert_eq!(
        snap.to_string(),
        "A:01 F:B0 B:00 C:13 D:00 E:D8 H:01 L:4D SP:FFFE PC:0100"
    );
}
