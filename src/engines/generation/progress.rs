use super::evolution_engine::ProgressCallback;

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        println!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, evaluations: usize) {
        println!(
            "Generation {} complete. Best fitness: {:.5}, evaluations so far: {}",
            generation + 1,
            best_fitness,
            evaluations
        );
    }

    fn on_candidate_evaluated(&mut self, candidate_num: usize, total: usize) {
        if candidate_num % 10 == 0 || candidate_num == total {
            println!("  Evaluated {}/{} candidates", candidate_num, total);
        }
    }
}

/// Discards all notifications; for embedding and tests.
pub struct NullProgressCallback;

impl ProgressCallback for NullProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _evaluations: usize) {}
    fn on_candidate_evaluated(&mut self, _candidate_num: usize, _total: usize) {}
}

// For driving a UI or supervisor from another thread.
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete {
        generation: usize,
        best_fitness: f64,
        evaluations: usize,
    },
    CandidateEvaluated {
        current: usize,
        total: usize,
    },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, evaluations: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            evaluations,
        });
    }

    fn on_candidate_evaluated(&mut self, candidate_num: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::CandidateEvaluated {
            current: candidate_num,
            total,
        });
    }
}
