// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ResultMessage;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Lifecycle of the shared result channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Open,
    /// Every producer has completed and the last sender is gone;
    /// buffered messages may still be waiting for the reader
    Closing,
    /// Closed and drained
    Closed,
}

impl ChannelState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => ChannelState::Open,
            1 => ChannelState::Closing,
            _ => ChannelState::Closed,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            ChannelState::Open => 0,
            ChannelState::Closing => 1,
            ChannelState::Closed => 2,
        }
    }
}

#[derive(Debug)]
struct SharedState(AtomicU8);

impl SharedState {
    fn get(&self) -> ChannelState {
        ChannelState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, state: ChannelState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }
}

/// Owning handle of the channel; hands out producers and performs the close
pub struct ResultSender {
    tx: mpsc::Sender<ResultMessage>,
    state: Arc<SharedState>,
}

/// Write-once handle given to a single task
pub struct ResultProducer {
    tx: mpsc::Sender<ResultMessage>,
}

pub struct ResultReceiver {
    rx: mpsc::Receiver<ResultMessage>,
    state: Arc<SharedState>,
}

/// Create a result channel able to buffer `capacity` messages
/// Sized to the number of producers, a write never waits on the reader
pub fn result_channel(capacity: usize) -> (ResultSender, ResultReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let state = Arc::new(SharedState(AtomicU8::new(ChannelState::Open.as_u8())));
    (
        ResultSender {
            tx,
            state: state.clone(),
        },
        ResultReceiver { rx, state },
    )
}

impl ResultSender {
    pub fn producer(&self) -> ResultProducer {
        ResultProducer {
            tx: self.tx.clone(),
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state.get()
    }

    /// Close the channel; the reader moves it to Closed once drained
    /// Must only be called once every producer has been consumed or dropped
    pub fn close(self) {
        self.state.set(ChannelState::Closing);
    }
}

impl ResultProducer {
    /// Send the task's one message
    /// Returns the message back if the receiver is gone
    pub async fn send(self, message: ResultMessage) -> Result<(), ResultMessage> {
        self.tx.send(message).await.map_err(|e| e.0)
    }
}

impl ResultReceiver {
    /// Next message, or None once the channel is closed and drained
    pub async fn recv(&mut self) -> Option<ResultMessage> {
        let message = self.rx.recv().await;
        if message.is_none() {
            self.state.set(ChannelState::Closed);
        }
        message
    }

    pub fn state(&self) -> ChannelState {
        self.state.get()
    }
}
