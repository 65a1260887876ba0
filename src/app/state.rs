use crate::api::{Backend, Candidate, SubmitOutcome, TallyRow};
use crate::camera::{new_frame_slot, CameraSession, FrameSlot};
use crate::forms::{LoginForm, RegisterForm, VoteForm};
use crate::ui::Widgets;
use gtk4::glib;

/// Which capture screen a camera event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureScreen {
    Register,
    Login,
}

impl CaptureScreen {
    pub fn label(self) -> &'static str {
        match self {
            CaptureScreen::Register => "register",
            CaptureScreen::Login => "login",
        }
    }
}

/// Which submission a transport failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitScreen {
    Register,
    Login,
    Vote,
}

/// Events sent from capture threads and the tokio runtime to the GTK main
/// thread.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    CameraStarted {
        screen: CaptureScreen,
        width: u32,
        height: u32,
    },
    CameraFailed {
        screen: CaptureScreen,
        message: String,
    },
    CaptchaLoaded(Vec<u8>),
    CaptchaFailed(String),
    RegisterDone(SubmitOutcome),
    LoginDone(SubmitOutcome),
    VoteDone(SubmitOutcome),
    /// Transport-level failure: the request never produced a structured reply.
    SubmitFailed {
        screen: SubmitScreen,
        message: String,
    },
    CandidatesLoaded(Vec<Candidate>),
    CandidatesFailed(String),
    SymbolLoaded {
        candidate_id: String,
        bytes: Vec<u8>,
    },
    ElectionStatusLoaded(String),
    TalliesLoaded(Vec<TallyRow>),
    ResultsFailed(String),
}

/// Application status. One submission at a time; there is no cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Idle,
    Submitting,
}

/// Central application state. Lives on the GTK main thread inside Rc<RefCell<>>.
pub struct AppState {
    pub status: AppStatus,
    pub backend: Backend,
    pub tokio_rt: tokio::runtime::Runtime,
    pub backend_sender: async_channel::Sender<BackendEvent>,

    pub register_form: RegisterForm,
    pub login_form: LoginForm,
    pub vote_form: VoteForm,

    // Camera sessions, one slot per capture screen
    pub register_camera: Option<CameraSession>,
    pub register_frames: FrameSlot,
    pub register_active: bool,
    pub register_preview: Option<glib::SourceId>,
    pub login_camera: Option<CameraSession>,
    pub login_frames: FrameSlot,
    pub login_active: bool,
    pub login_preview: Option<glib::SourceId>,

    pub candidates: Vec<Candidate>,

    // UI handles
    pub ui: Option<Widgets>,
}

impl AppState {
    pub fn new(sender: async_channel::Sender<BackendEvent>) -> Self {
        let tokio_rt = tokio::runtime::Runtime::new()
            .expect("Failed to create tokio runtime");

        Self {
            status: AppStatus::Idle,
            backend: Backend::new(),
            tokio_rt,
            backend_sender: sender,
            register_form: RegisterForm::default(),
            login_form: LoginForm::default(),
            vote_form: VoteForm::default(),
            register_camera: None,
            register_frames: new_frame_slot(),
            register_active: false,
            register_preview: None,
            login_camera: None,
            login_frames: new_frame_slot(),
            login_active: false,
            login_preview: None,
            candidates: Vec::new(),
            ui: None,
        }
    }
}
