use crate::capabilities::map::MapCapability;
use crate::capabilities::presentation::Presentation;
use crate::capabilities::scheduler::Scheduler;
use crate::storage::ByteStore;

#[derive(PartialEq, Copy, Clone)]
pub enum Required {
    Map,
    Presentation,
    Scheduler,
    ByteStore,
}

/// The external collaborators an App runs against.
pub struct Facilities {
    map: Option<Box<dyn MapCapability>>,
    presentation: Option<Box<dyn Presentation>>,
    scheduler: Option<Box<dyn Scheduler>>,
    byte_store: Option<Box<dyn ByteStore>>,
}

impl Facilities {
    pub fn check(&self, required: &[Required]) {
        for dep in required {
            match dep {
                Required::Map => {
                    self.map.as_ref().expect("Expecting map capability");
                }
                Required::Presentation => {
                    self.presentation
                        .as_ref()
                        .expect("Expecting presentation capability");
                }
                Required::Scheduler => {
                    self.scheduler
                        .as_ref()
                        .expect("Expecting scheduler capability");
                }
                Required::ByteStore => {
                    self.byte_store.as_ref().expect("Expecting byte store");
                }
            }
        }
    }

    pub(crate) fn take_map(&mut self) -> Box<dyn MapCapability> {
        self.map.take().expect("Expecting map capability")
    }

    pub(crate) fn take_presentation(&mut self) -> Box<dyn Presentation> {
        self.presentation
            .take()
            .expect("Expecting presentation capability")
    }

    pub(crate) fn take_scheduler(&mut self) -> Box<dyn Scheduler> {
        self.scheduler.take().expect("Expecting scheduler capability")
    }

    pub(crate) fn take_byte_store(&mut self) -> Box<dyn ByteStore> {
        self.byte_store.take().expect("Expecting byte store")
    }
}

pub struct DependenciesBuilder {
    dependencies: Facilities,
}

impl DependenciesBuilder {
    pub fn new() -> Self {
        Self {
            dependencies: Facilities {
                map: None,
                presentation: None,
                scheduler: None,
                byte_store: None,
            },
        }
    }

    pub fn with_map(mut self, map: Box<dyn MapCapability>) -> Self {
        self.dependencies.map = Some(map);
        self
    }

    pub fn with_presentation(mut self, presentation: Box<dyn Presentation>) -> Self {
        self.dependencies.presentation = Some(presentation);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.dependencies.scheduler = Some(scheduler);
        self
    }

    pub fn with_byte_store(mut self, byte_store: Box<dyn ByteStore>) -> Self {
        self.dependencies.byte_store = Some(byte_store);
        self
    }

    pub fn build(self) -> Facilities {
        self.dependencies
    }
}

impl Default for DependenciesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
