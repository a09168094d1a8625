// Registry: builds the page's independent calculator instances from one shared catalog

use crate::calculator::{CalculatorInstance, FieldKind};
use crate::catalog::RoomCatalog;
use crate::config::CalculatorConfig;
use crate::dates::{Clock, DateGuard};
use crate::error::{CalculatorError, Result};
use crate::page::{FieldBindings, FieldIds, Page};
use crate::pricing::BookingQuote;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MAIN_INSTANCE: &str = "main";
pub const MODAL_INSTANCE: &str = "modal";

#[derive(Debug, Clone)]
pub struct InstanceSpec {
    pub name: String,
    pub ids: FieldIds,
}

impl InstanceSpec {
    pub fn new(name: impl Into<String>, ids: FieldIds) -> Self {
        Self {
            name: name.into(),
            ids,
        }
    }
}

#[derive(Debug)]
struct RegisteredInstance {
    ids: FieldIds,
    calculator: CalculatorInstance,
}

// Owns every calculator instance on the page.
//
// Instances get disjoint element sets and their own notice timers; the only
// value they share is the read-only catalog behind an `Arc`.
#[derive(Debug)]
pub struct Registry {
    catalog: Arc<RoomCatalog>,
    config: CalculatorConfig,
    instances: Vec<RegisteredInstance>,
}

impl Registry {
    pub fn build(
        page: &Page,
        catalog: Arc<RoomCatalog>,
        clock: Arc<dyn Clock>,
        config: CalculatorConfig,
        specs: Vec<InstanceSpec>,
    ) -> Result<Self> {
        validate_specs(&specs)?;

        let guard = DateGuard::new(clock);
        let mut instances = Vec::with_capacity(specs.len());
        for spec in specs {
            // A missing element only costs this one instance
            let bindings = match FieldBindings::resolve(page, &spec.name, &spec.ids) {
                Ok(bindings) => bindings,
                Err(e) => {
                    warn!("Skipping calculator setup: {}", e);
                    continue;
                }
            };

            let calculator = CalculatorInstance::new(
                spec.name.clone(),
                bindings,
                Arc::clone(&catalog),
                guard.clone(),
                &config,
            );
            info!("Calculator {} bound", spec.name);
            instances.push(RegisteredInstance {
                ids: spec.ids,
                calculator,
            });
        }

        Ok(Self {
            catalog,
            config,
            instances,
        })
    }

    // The booking section form and the booking modal form
    pub fn standard(
        page: &Page,
        catalog: Arc<RoomCatalog>,
        clock: Arc<dyn Clock>,
        config: CalculatorConfig,
    ) -> Result<Self> {
        Self::build(
            page,
            catalog,
            clock,
            config,
            vec![
                InstanceSpec::new(MAIN_INSTANCE, FieldIds::main()),
                InstanceSpec::new(MODAL_INSTANCE, FieldIds::modal()),
            ],
        )
    }

    // Builds the standard pair and settles both after the deferred init tick
    pub async fn start(
        page: &Page,
        catalog: Arc<RoomCatalog>,
        clock: Arc<dyn Clock>,
        config: CalculatorConfig,
    ) -> Result<Self> {
        let mut registry = Self::standard(page, catalog, clock, config)?;
        tokio::time::sleep(registry.config.init_delay()).await;
        registry.initialize_all();
        Ok(registry)
    }

    pub fn initialize_all(&mut self) {
        for entry in &mut self.instances {
            entry.calculator.initialize();
        }
    }

    pub fn catalog(&self) -> &Arc<RoomCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instances.iter().map(|e| e.calculator.name())
    }

    pub fn get(&self, name: &str) -> Option<&CalculatorInstance> {
        self.instances
            .iter()
            .find(|e| e.calculator.name() == name)
            .map(|e| &e.calculator)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CalculatorInstance> {
        self.instances
            .iter_mut()
            .find(|e| e.calculator.name() == name)
            .map(|e| &mut e.calculator)
    }

    pub fn main(&self) -> Option<&CalculatorInstance> {
        self.get(MAIN_INSTANCE)
    }

    pub fn main_mut(&mut self) -> Option<&mut CalculatorInstance> {
        self.get_mut(MAIN_INSTANCE)
    }

    pub fn modal(&self) -> Option<&CalculatorInstance> {
        self.get(MODAL_INSTANCE)
    }

    pub fn modal_mut(&mut self) -> Option<&mut CalculatorInstance> {
        self.get_mut(MODAL_INSTANCE)
    }

    // Delivers a change event to the single instance owning the element
    pub fn dispatch(&mut self, element_id: &str) -> Option<BookingQuote> {
        for entry in &mut self.instances {
            if let Some(kind) = field_kind(&entry.ids, element_id) {
                return Some(entry.calculator.handle_change(kind));
            }
        }
        debug!("Change event for unbound element {}", element_id);
        None
    }

    // Room card "book" buttons preselect the room in the modal form only
    pub fn prefill_modal_room(&mut self, room_type: &str) -> Option<BookingQuote> {
        match self.modal_mut() {
            Some(modal) => Some(modal.prefill_room_type(room_type)),
            None => {
                warn!("No modal calculator to prefill with {}", room_type);
                None
            }
        }
    }
}

fn field_kind(ids: &FieldIds, element_id: &str) -> Option<FieldKind> {
    if element_id == ids.checkin {
        Some(FieldKind::CheckIn)
    } else if element_id == ids.checkout {
        Some(FieldKind::CheckOut)
    } else if element_id == ids.room_type {
        Some(FieldKind::RoomType)
    } else {
        None
    }
}

fn validate_specs(specs: &[InstanceSpec]) -> Result<()> {
    let mut names = HashSet::new();
    let mut element_ids = HashSet::new();
    for spec in specs {
        if !names.insert(spec.name.as_str()) {
            return Err(CalculatorError::DuplicateInstance(spec.name.clone()));
        }
        for id in spec.ids.all() {
            if !element_ids.insert(id) {
                return Err(CalculatorError::OverlappingBindings(id.to_string()));
            }
        }
    }
    Ok(())
}
