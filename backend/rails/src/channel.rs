use crate::error::EngineError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;

#[derive(Debug)]
enum Envelope {
    Action(String),
    /// Only there to wake up a blocked receiver; the flag is what matters.
    Interrupt,
}

/// Creates the hand-off queue between any number of action producers and the single engine
/// consuming them.
///
/// # Example
/// ```
/// use rails::channel::action_channel;
///
/// let (sender, receiver) = action_channel();
/// sender.submit("deck").unwrap();
/// sender.submit("red").unwrap();
/// assert_eq!(receiver.recv().unwrap(), "deck");
/// assert_eq!(receiver.recv().unwrap(), "red");
/// ```
pub fn action_channel() -> (ActionSender, ActionReceiver) {
    let (tx, rx) = mpsc::channel();
    let interrupted = Arc::new(AtomicBool::new(false));

    (
        ActionSender {
            tx,
            interrupted: Arc::clone(&interrupted),
        },
        ActionReceiver { rx, interrupted },
    )
}

/// Producer side of the action channel. Clone it to hand one to each input source.
#[derive(Clone, Debug)]
pub struct ActionSender {
    tx: mpsc::Sender<Envelope>,
    interrupted: Arc<AtomicBool>,
}

impl ActionSender {
    /// Queues a raw action token. Never blocks, and never drops a token of a live game.
    pub fn submit(&self, token: impl Into<String>) -> Result<(), EngineError> {
        if self.interrupted.load(Ordering::SeqCst) {
            return Err(EngineError::GameClosed);
        }

        self.tx
            .send(Envelope::Action(token.into()))
            .map_err(|_| EngineError::GameClosed)
    }

    /// Asks the consumer to stop. Tokens still queued are never delivered.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        // The receiver may already be gone, in which case there is no one to wake up.
        let _ = self.tx.send(Envelope::Interrupt);
    }
}

/// Consumer side of the action channel, owned by the engine.
#[derive(Debug)]
pub struct ActionReceiver {
    rx: mpsc::Receiver<Envelope>,
    interrupted: Arc<AtomicBool>,
}

impl ActionReceiver {
    /// Blocks until the next action token arrives.
    ///
    /// Returns [`EngineError::Interrupted`] as soon as an interruption was requested, even if
    /// tokens are still queued, and [`EngineError::Disconnected`] once every sender is gone.
    pub fn recv(&self) -> Result<String, EngineError> {
        loop {
            if self.is_interrupted() {
                return Err(EngineError::Interrupted);
            }

            match self.rx.recv() {
                Ok(Envelope::Action(_)) if self.is_interrupted() => {
                    return Err(EngineError::Interrupted)
                }
                Ok(Envelope::Action(token)) => return Ok(token),
                Ok(Envelope::Interrupt) => continue,
                Err(mpsc::RecvError) => return Err(EngineError::Disconnected),
            }
        }
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;
    use std::time::Duration;

    #[test]
    fn tokens_are_delivered_in_order() {
        let (sender, receiver) = action_channel();

        for token in ["a", "b", "c"] {
            sender.submit(token).unwrap();
        }

        assert_eq!(receiver.recv(), Ok(String::from("a")));
        assert_eq!(receiver.recv(), Ok(String::from("b")));
        assert_eq!(receiver.recv(), Ok(String::from("c")));
    }

    #[test]
    fn many_producers_keep_their_own_order() {
        let (sender, receiver) = action_channel();

        let producers: Vec<_> = (0..4)
            .map(|producer| {
                let sender = sender.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        sender.submit(format!("{}:{}", producer, i)).unwrap();
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        let mut last_seen = [None; 4];
        for _ in 0..200 {
            let token = receiver.recv().unwrap();
            let (producer, i) = token.split_once(':').unwrap();
            let producer: usize = producer.parse().unwrap();
            let i: usize = i.parse().unwrap();

            if let Some(last) = last_seen[producer] {
                assert!(i > last);
            }
            last_seen[producer] = Some(i);
        }
        assert_eq!(last_seen, [Some(49); 4]);
    }

    #[test]
    fn interruption_takes_priority_over_queued_tokens() {
        let (sender, receiver) = action_channel();

        sender.submit("deck").unwrap();
        sender.interrupt();

        assert_eq!(receiver.recv(), Err(EngineError::Interrupted));
        assert_eq!(receiver.recv(), Err(EngineError::Interrupted));
        assert_eq!(sender.submit("red"), Err(EngineError::GameClosed));
    }

    #[test]
    fn interruption_wakes_up_a_blocked_receiver() {
        let (sender, receiver) = action_channel();

        let consumer = thread::spawn(move || receiver.recv());
        thread::sleep(Duration::from_millis(20));
        sender.interrupt();

        assert_eq!(consumer.join().unwrap(), Err(EngineError::Interrupted));
    }

    #[test]
    fn every_sender_dropped() {
        let (sender, receiver) = action_channel();
        let other = sender.clone();

        sender.submit("deck").unwrap();
        drop(sender);
        drop(other);

        assert_eq!(receiver.recv(), Ok(String::from("deck")));
        assert_eq!(receiver.recv(), Err(EngineError::Disconnected));
    }

    #[test]
    fn receiver_dropped() {
        let (sender, receiver) = action_channel();
        drop(receiver);

        assert_eq!(sender.submit("deck"), Err(EngineError::GameClosed));
        sender.interrupt();
    }
}
