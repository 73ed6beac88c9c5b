//! Example of using `Thunk` as the work item of a fixed-capacity event queue, the way a
//! beacon's firmware main loop defers its button and blink handlers without touching the heap.

use inline_thunk::{bind, Thunk};
use std::{
	cell::Cell,
	rc::Rc,
};
use crossbeam::queue::ArrayQueue;


/// Deferred unit of work.
type Event = Thunk<32>;

/// Fixed-capacity FIFO of pending events.
struct EventQueue {
	queue: ArrayQueue<Event>,
}

/// Simulated board state.
#[derive(Default)]
struct Board {
	config_led: Cell<bool>,
	beacon_on: Cell<bool>,
	blinks: Cell<u32>,
}

impl EventQueue {
	fn new(capacity: usize) -> Self {
		EventQueue { queue: ArrayQueue::new(capacity) }
	}

	/// Post a copy of an event. Returns false if the queue is full.
	fn post(&self, event: &Event) -> bool {
		self.queue.push(event.clone()).is_ok()
	}

	/// Run events until the queue drains, including ones posted while running.
	fn dispatch(&self) -> usize {
		let mut ran = 0;
		while let Some(mut event) = self.queue.pop() {
			event.call();
			ran += 1;
		}
		ran
	}
}

/// Toggle the config LED, then re-post itself until `remaining` runs out.
fn blink(queue: Rc<EventQueue>, board: Rc<Board>, remaining: u32) {
	board.config_led.set(!board.config_led.get());
	board.blinks.set(board.blinks.get() + 1);
	if remaining > 0 {
		let next: Event = bind(blink, (Rc::clone(&queue), Rc::clone(&board), remaining - 1));
		queue.post(&next);
	}
}

fn button_pressed(board: Rc<Board>) {
	board.beacon_on.set(!board.beacon_on.get());
	println!("beacon {}", if board.beacon_on.get() { "on" } else { "off" });
}

fn main() {
	let queue = Rc::new(EventQueue::new(10));
	let board = Rc::new(Board::default());

	let start_blinking: Event = bind(blink, (Rc::clone(&queue), Rc::clone(&board), 5u32));
	let press: Event = bind(button_pressed, (Rc::clone(&board),));
	let idle = Event::default();

	queue.post(&start_blinking);
	queue.post(&press);
	queue.post(&idle);
	queue.post(&press);
	queue.post(&press);

	let ran = queue.dispatch();
	println!("dispatched {} events, led blinked {} times", ran, board.blinks.get());
	println!("config led {}", if board.config_led.get() { "on" } else { "off" });

	// a full queue rejects further posts instead of allocating
	let fillers = (0..12).filter(|_| queue.post(&idle)).count();
	println!("queue accepted {} of 12 idle events", fillers);
	queue.dispatch();
}
