//! Recording mocks shared by the driver integration tests.
//!
//! Every mock appends to one `Rc<RefCell<Vec<Op>>>` log so tests can assert
//! on the exact interleaving of bus traffic, register access and delays.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use xsynth_hal::{GpioMemory, I2cBus, RegisterWindow};

/// One observed hardware operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Select(u8),
    Write(u8, Vec<u8>),
    Read(u8, usize),
    Open,
    RegWrite(usize, u32),
    DelayNs(u64),
    Unmap,
    Reset,
}

pub type Log = Rc<RefCell<Vec<Op>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// How the next bus write should behave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Full,
    Short(usize),
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

/// Bus that logs every transaction and follows a script of outcomes
#[derive(Clone)]
pub struct MockBus {
    log: Log,
    writes: Rc<RefCell<VecDeque<WriteOutcome>>>,
    reads: Rc<RefCell<VecDeque<Vec<u8>>>>,
    fail_select: Rc<RefCell<bool>>,
}

impl MockBus {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            writes: Rc::new(RefCell::new(VecDeque::new())),
            reads: Rc::new(RefCell::new(VecDeque::new())),
            fail_select: Rc::new(RefCell::new(false)),
        }
    }

    /// Queue outcomes for upcoming writes; unscripted writes succeed
    pub fn script_writes(&self, outcomes: &[WriteOutcome]) {
        self.writes.borrow_mut().extend(outcomes.iter().copied());
    }

    /// Queue bytes for the next read (may be shorter than requested)
    pub fn queue_read(&self, bytes: &[u8]) {
        self.reads.borrow_mut().push_back(bytes.to_vec());
    }

    pub fn fail_select(&self, fail: bool) {
        *self.fail_select.borrow_mut() = fail;
    }

    /// All payloads written to `address`, in order
    pub fn writes_to(&self, address: u8) -> Vec<Vec<u8>> {
        self.log
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Write(a, data) if *a == address => Some(data.clone()),
                _ => None,
            })
            .collect()
    }
}

impl I2cBus for MockBus {
    type Error = MockBusError;

    fn select(&mut self, address: u8) -> Result<(), Self::Error> {
        if *self.fail_select.borrow() {
            return Err(MockBusError);
        }
        self.log.borrow_mut().push(Op::Select(address));
        Ok(())
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error> {
        let outcome = self
            .writes
            .borrow_mut()
            .pop_front()
            .unwrap_or(WriteOutcome::Full);
        self.log.borrow_mut().push(Op::Write(address, data.to_vec()));
        match outcome {
            WriteOutcome::Full => Ok(data.len()),
            WriteOutcome::Short(n) => Ok(n.min(data.len())),
            WriteOutcome::Fail => Err(MockBusError),
        }
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.log.borrow_mut().push(Op::Read(address, buf.len()));
        let bytes = self.reads.borrow_mut().pop_front().ok_or(MockBusError)?;
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }
}

/// Register window that logs writes and unmapping
pub struct MockWindow {
    log: Log,
    regs: Vec<u32>,
}

impl RegisterWindow for MockWindow {
    fn len(&self) -> usize {
        self.regs.len()
    }

    fn read(&self, index: usize) -> u32 {
        self.regs[index]
    }

    fn write(&mut self, index: usize, value: u32) {
        self.log.borrow_mut().push(Op::RegWrite(index, value));
        self.regs[index] = value;
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Op::Unmap);
    }
}

/// GPIO memory that hands out logging windows
pub struct MockGpioMemory {
    log: Log,
    words: usize,
    fail_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockOpenError;

impl MockGpioMemory {
    pub fn new(log: &Log, words: usize) -> Self {
        Self {
            log: log.clone(),
            words,
            fail_open: false,
        }
    }

    pub fn failing(log: &Log) -> Self {
        Self {
            log: log.clone(),
            words: 0,
            fail_open: true,
        }
    }
}

impl GpioMemory for MockGpioMemory {
    type Window = MockWindow;
    type Error = MockOpenError;

    fn open(&mut self) -> Result<Self::Window, Self::Error> {
        if self.fail_open {
            return Err(MockOpenError);
        }
        self.log.borrow_mut().push(Op::Open);
        Ok(MockWindow {
            log: self.log.clone(),
            regs: vec![0; self.words],
        })
    }
}

/// Delay that only records how long it was asked to wait
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Op::DelayNs(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Op::DelayNs(us as u64 * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Op::DelayNs(ms as u64 * 1_000_000));
    }
}
