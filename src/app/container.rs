use std::sync::Arc;

use crate::adapters::{FsLocalAdapter, MkvinfoProbeAdapter, ProcessExecAdapter};
use crate::app::{
    inspect_interactor::InspectInteractor, organize_interactor::OrganizeInteractor,
    process_interactor::ProcessInteractor,
};
use crate::config_initialization::Settings;
use crate::domain::errors::DomainError;
use crate::ports::{ExecutePort, FsPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn process_interactor(&self) -> Arc<ProcessInteractor>;
    fn organize_interactor(&self) -> Arc<OrganizeInteractor>;
}

pub struct DefaultAppContainer {
    inspect_interactor: Arc<InspectInteractor>,
    process_interactor: Arc<ProcessInteractor>,
    organize_interactor: Arc<OrganizeInteractor>,
}

impl DefaultAppContainer {
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let execute_port: Arc<dyn ExecutePort> =
            Arc::new(ProcessExecAdapter::new(settings.pipeline.effective_jobs())?);
        let probe_port: Arc<dyn ProbePort> = Arc::new(MkvinfoProbeAdapter::new(
            settings.tools.mkvinfo.clone(),
            Arc::clone(&execute_port),
        ));
        let fs_port: Arc<dyn FsPort> = Arc::new(FsLocalAdapter::new());

        Self::with_ports(settings, probe_port, execute_port, fs_port)
    }

    /// Wire interactors around caller-supplied ports
    pub fn with_ports(
        settings: &Settings,
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Result<Self, DomainError> {
        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&fs_port),
        ));

        let process_interactor = Arc::new(ProcessInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            settings,
        ));

        let organize_interactor = Arc::new(OrganizeInteractor::new(Arc::clone(&fs_port), settings)?);

        Ok(Self {
            inspect_interactor,
            process_interactor,
            organize_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn process_interactor(&self) -> Arc<ProcessInteractor> {
        Arc::clone(&self.process_interactor)
    }

    fn organize_interactor(&self) -> Arc<OrganizeInteractor> {
        Arc::clone(&self.organize_interactor)
    }
}
