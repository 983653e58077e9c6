//! Mark-and-sweep collection over the interpreter heap.
//!
//! Collection is explicit and stop-the-world: callers run it between
//! top-level evaluations, when the only live state is what the
//! interpreter itself holds. Marking starts from the globals, the
//! function table, the module registry, pinned roots and the current
//! environment and receiver cursors, then follows container elements,
//! instance fields, class methods and closure environments. Every slot
//! that was not reached is freed and its generation bumped, so a stale
//! handle is detected instead of aliasing a new object.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use gumus_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::value::{EnvRef, HeapObject, ObjRef, Value};

/// Cumulative collector statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GcStats {
    pub collections: u64,
    pub total_pause: Duration,
    pub min_pause: Option<Duration>,
    pub max_pause: Duration,
    pub objects_collected: u64,
    pub envs_collected: u64,
    pub bytes_freed: u64,
}

impl GcStats {
    fn record(&mut self, report: &CollectionReport) {
        self.collections += 1;
        self.total_pause += report.pause;
        self.min_pause = Some(self.min_pause.map_or(report.pause, |min| min.min(report.pause)));
        self.max_pause = self.max_pause.max(report.pause);
        self.objects_collected += report.objects_freed as u64;
        self.envs_collected += report.envs_freed as u64;
        self.bytes_freed += report.bytes_freed as u64;
    }

    pub fn average_pause(&self) -> Duration {
        match u32::try_from(self.collections) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.total_pause / n,
        }
    }
}

/// Outcome of one collection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionReport {
    pub objects_freed: usize,
    pub envs_freed: usize,
    pub bytes_freed: usize,
    pub pause: Duration,
}

/// Objects and frames reached in one mark phase.
#[derive(Default)]
struct Marks {
    objects: FxHashSet<ObjRef>,
    envs: FxHashSet<EnvRef>,
}

enum Node {
    Object(ObjRef),
    Env(EnvRef),
}

fn env_size(env: &Environment) -> usize {
    env.bindings()
        .map(|(name, value)| name.len() + value.size_estimate())
        .sum()
}

impl Interpreter {
    /// Keep `value` alive regardless of reachability. Pins are counted.
    pub fn add_root(&mut self, value: &Value) {
        if let Some(handle) = value.handle() {
            *self.roots.entry(handle).or_insert(0) += 1;
        }
    }

    /// Undo one [`Self::add_root`].
    pub fn remove_root(&mut self, value: &Value) {
        let Some(handle) = value.handle() else {
            return;
        };
        if let Some(count) = self.roots.get_mut(&handle) {
            *count -= 1;
            if *count == 0 {
                self.roots.remove(&handle);
            }
        }
    }

    pub fn gc_stats(&self) -> &GcStats {
        &self.gc_stats
    }

    fn mark(&self) -> Marks {
        let mut marks = Marks::default();
        let mut worklist: Vec<Node> = Vec::new();
        let push_value = |worklist: &mut Vec<Node>, value: &Value| {
            if let Some(handle) = value.handle() {
                worklist.push(Node::Object(handle));
            }
        };

        worklist.push(Node::Env(self.globals));
        worklist.push(Node::Env(self.env));
        worklist.extend(self.modules.values().map(|&env| Node::Env(env)));
        worklist.extend(self.roots.keys().map(|&obj| Node::Object(obj)));
        for value in self.functions.values() {
            push_value(&mut worklist, value);
        }
        for &(env, receiver) in &self.saved_frames {
            worklist.push(Node::Env(env));
            worklist.extend(receiver.map(Node::Object));
        }
        worklist.extend(self.receiver.map(Node::Object));

        while let Some(node) = worklist.pop() {
            match node {
                Node::Env(handle) => {
                    if !marks.envs.insert(handle) {
                        continue;
                    }
                    let Some(env) = self.heap.envs.get(handle) else {
                        continue;
                    };
                    for (_, value) in env.bindings() {
                        push_value(&mut worklist, value);
                    }
                    worklist.extend(env.parent().map(Node::Env));
                }
                Node::Object(handle) => {
                    if !marks.objects.insert(handle) {
                        continue;
                    }
                    let Some(object) = self.heap.objects.get(handle) else {
                        continue;
                    };
                    object.for_each_value(|value| push_value(&mut worklist, value));
                    worklist.extend(object.closure().map(Node::Env));
                }
            }
        }
        marks
    }

    /// Free everything unreachable from the roots.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn collect_garbage(&mut self) -> CollectionReport {
        let start = Instant::now();
        let marks = self.mark();

        let mut bytes_freed = 0;
        let freed_objects = self
            .heap
            .objects
            .sweep(|handle, _| marks.objects.contains(&handle));
        bytes_freed += freed_objects
            .iter()
            .map(HeapObject::size_estimate)
            .sum::<usize>();
        let freed_envs = self
            .heap
            .envs
            .sweep(|handle, _| marks.envs.contains(&handle));
        bytes_freed += freed_envs.iter().map(env_size).sum::<usize>();

        let report = CollectionReport {
            objects_freed: freed_objects.len(),
            envs_freed: freed_envs.len(),
            bytes_freed,
            pause: start.elapsed(),
        };
        self.gc_stats.record(&report);
        tracing::debug!(
            objects = report.objects_freed,
            envs = report.envs_freed,
            bytes = report.bytes_freed,
            live = self.heap.object_count(),
            "collected"
        );
        report
    }

    /// Live objects per kind.
    pub fn live_histogram(&self) -> BTreeMap<&'static str, usize> {
        let mut histogram = BTreeMap::new();
        for (_, object) in self.heap.objects.iter() {
            *histogram.entry(object.kind_name()).or_insert(0) += 1;
        }
        histogram
    }

    /// Human-readable collector summary.
    pub fn generate_report(&self) -> String {
        let stats = &self.gc_stats;
        let mut out = String::new();
        let _ = writeln!(out, "=== Cop Toplayici Raporu ===");
        let _ = writeln!(out, "Toplama sayisi: {}", stats.collections);
        let _ = writeln!(out, "Toplanan nesne: {}", stats.objects_collected);
        let _ = writeln!(out, "Toplanan ortam: {}", stats.envs_collected);
        let _ = writeln!(out, "Serbest birakilan bayt: {}", stats.bytes_freed);
        let _ = writeln!(out, "Toplam duraklama: {:?}", stats.total_pause);
        let _ = writeln!(out, "Ortalama duraklama: {:?}", stats.average_pause());
        let _ = writeln!(
            out,
            "En kisa/en uzun duraklama: {:?} / {:?}",
            stats.min_pause.unwrap_or_default(),
            stats.max_pause
        );
        let _ = writeln!(out, "Canli nesne: {}", self.heap.object_count());
        let _ = writeln!(out, "Canli ortam: {}", self.heap.env_count());
        let _ = writeln!(out, "Tahmini bellek: {} bayt", self.heap.size_estimate());
        for (kind, count) in self.live_histogram() {
            let _ = writeln!(out, "  {kind}: {count}");
        }
        out
    }

    /// One line per live object: `[i] Type (display) [MARKED|UNMARKED]`.
    pub fn dump_heap(&self) -> Vec<String> {
        let marks = self.mark();
        self.heap
            .objects
            .iter()
            .map(|(handle, object)| {
                let state = if marks.objects.contains(&handle) {
                    "MARKED"
                } else {
                    "UNMARKED"
                };
                let display = self.display(&object_value(handle, object));
                format!("[{}] {} ({display}) [{state}]", handle.index(), object.kind_name())
            })
            .collect()
    }

    /// Live containers, reported as potential leaks.
    pub fn detect_leaks(&self) -> Vec<String> {
        self.heap
            .objects
            .iter()
            .filter(|(_, object)| matches!(object, HeapObject::List(_) | HeapObject::Map(_)))
            .map(|(handle, object)| {
                format!(
                    "Olasi sizinti: {} {}",
                    object.kind_name(),
                    self.display(&object_value(handle, object))
                )
            })
            .collect()
    }

    /// Handles held by live objects or frames that point at freed slots.
    pub fn validate_heap(&self) -> Vec<String> {
        let dangling = |value: &Value| value.handle().filter(|&h| !self.heap.objects.contains(h));
        let mut problems = Vec::new();
        for (handle, object) in self.heap.objects.iter() {
            object.for_each_value(|value| {
                if let Some(target) = dangling(value) {
                    problems.push(format!("nesne {handle}: gecersiz referans {target}"));
                }
            });
            if let Some(env) = object.closure().filter(|&e| !self.heap.envs.contains(e)) {
                problems.push(format!("nesne {handle}: gecersiz ortam {env}"));
            }
        }
        for (handle, env) in self.heap.envs.iter() {
            for (_, value) in env.bindings() {
                if let Some(target) = dangling(value) {
                    problems.push(format!("ortam {handle}: gecersiz referans {target}"));
                }
            }
            if let Some(parent) = env.parent().filter(|&p| !self.heap.envs.contains(p)) {
                problems.push(format!("ortam {handle}: gecersiz ust ortam {parent}"));
            }
        }
        problems
    }

    /// Reference cycles among lists, maps and instances. Each cycle is
    /// reported once, as the display strings along its path.
    pub fn detect_cycles(&self) -> Vec<String> {
        let mut visited = FxHashSet::default();
        let mut path = Vec::new();
        let mut cycles = Vec::new();
        for (handle, _) in self.heap.objects.iter() {
            self.visit_for_cycles(handle, &mut visited, &mut path, &mut cycles);
        }
        cycles
    }

    fn visit_for_cycles(
        &self,
        handle: ObjRef,
        visited: &mut FxHashSet<ObjRef>,
        path: &mut Vec<ObjRef>,
        cycles: &mut Vec<String>,
    ) {
        ensure_sufficient_stack(|| {
            if let Some(start) = path.iter().position(|&h| h == handle) {
                let members: Vec<String> = path[start..]
                    .iter()
                    .map(|&h| self.describe(h))
                    .collect();
                cycles.push(format!("Dongu: {} -> {}", members.join(" -> "), self.describe(handle)));
                return;
            }
            if !visited.insert(handle) {
                return;
            }
            let Some(object) = self.heap.objects.get(handle) else {
                return;
            };
            let mut children = Vec::new();
            match object {
                HeapObject::List(_) | HeapObject::Map(_) | HeapObject::Instance(_) => {
                    object.for_each_value(|value| {
                        if let Value::List(h) | Value::Map(h) | Value::Instance(h) = value {
                            children.push(*h);
                        }
                    });
                }
                _ => return,
            }
            path.push(handle);
            for child in children {
                self.visit_for_cycles(child, visited, path, cycles);
            }
            path.pop();
        });
    }

    fn describe(&self, handle: ObjRef) -> String {
        match self.heap.objects.get(handle) {
            Some(object) => format!("{} {handle}", object.kind_name()),
            None => format!("? {handle}"),
        }
    }
}

/// The value that refers to `object`.
fn object_value(handle: ObjRef, object: &HeapObject) -> Value {
    match object {
        HeapObject::List(_) => Value::List(handle),
        HeapObject::Map(_) => Value::Map(handle),
        HeapObject::Class(_) => Value::Class(handle),
        HeapObject::Instance(_) => Value::Instance(handle),
        HeapObject::Function(_) | HeapObject::Native(_) => Value::Function(handle),
    }
}
