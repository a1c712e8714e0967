use crate::app::App;
use crate::overlay;
use kinetic_core::{AudioLevel, AudioMeter, ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(context: &str, e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{}: {:?}", context, e)
}

/// Microphone -> AnalyserNode -> AudioMeter, sampled once per frame.
pub struct MicAnalyser {
    ctx: web::AudioContext,
    stream: web::MediaStream,
    analyser: web::AnalyserNode,
    // keeps the graph alive
    _source: web::MediaStreamAudioSourceNode,
    meter: AudioMeter,
    bins: Vec<u8>,
}

impl MicAnalyser {
    /// Ask for microphone permission and build the analyser graph.
    pub async fn start() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| js_err("mediaDevices", e))?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| js_err("getUserMedia", e))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| js_err("microphone permission", e))?
            .dyn_into()
            .map_err(|e| js_err("MediaStream", e))?;

        let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
        _ = ctx.resume();
        let source = ctx
            .create_media_stream_source(&stream)
            .map_err(|e| js_err("MediaStreamSource", e))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| js_err("AnalyserNode", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE as u32);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING as f64);
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| js_err("connect", e))?;

        let bins = vec![0u8; analyser.frequency_bin_count() as usize];
        log::info!("[audio] microphone analyser running, {} bins", bins.len());
        Ok(Self {
            ctx,
            stream,
            analyser,
            _source: source,
            meter: AudioMeter::new(AudioLevel::new()),
            bins,
        })
    }

    pub fn level(&self) -> AudioLevel {
        self.meter.level().clone()
    }

    /// Pull this frame's byte spectrum into the meter.
    pub fn sample(&mut self) -> f32 {
        self.analyser.get_byte_frequency_data(&mut self.bins);
        self.meter.update_from_bytes(&self.bins)
    }

    pub fn stop(mut self) {
        self.meter.reset();
        let tracks: js_sys::Array = self.stream.get_tracks();
        for track in tracks.iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        _ = self.ctx.close();
        log::info!("[audio] microphone stopped");
    }
}

#[derive(Default)]
pub enum MicState {
    #[default]
    Off,
    Starting,
    On(MicAnalyser),
}

/// Start the microphone if it is off, stop it if it is on. A request while
/// permission is pending is ignored.
pub fn toggle(app: &Rc<App>) {
    let previous = std::mem::take(&mut *app.mic.borrow_mut());
    match previous {
        MicState::On(mic) => {
            mic.stop();
            app.engine.borrow_mut().detach_audio();
            overlay::set_audio_button(&app.document, false);
            overlay::set_status(&app.document, "Microphone off");
        }
        MicState::Starting => {
            *app.mic.borrow_mut() = MicState::Starting;
            log::debug!("[audio] start already pending");
        }
        MicState::Off => {
            *app.mic.borrow_mut() = MicState::Starting;
            overlay::set_status(&app.document, "Requesting microphone...");
            let app = Rc::clone(app);
            spawn_local(async move {
                match MicAnalyser::start().await {
                    Ok(mic) if !app.control.is_running() => mic.stop(),
                    Ok(mic) => {
                        app.engine.borrow_mut().attach_audio(mic.level());
                        *app.mic.borrow_mut() = MicState::On(mic);
                        overlay::set_audio_button(&app.document, true);
                        overlay::set_status(&app.document, "Listening");
                    }
                    Err(e) => {
                        log::error!("[audio] {:?}", e);
                        *app.mic.borrow_mut() = MicState::Off;
                        overlay::set_audio_button(&app.document, false);
                        overlay::set_status(&app.document, "Microphone unavailable");
                    }
                }
            });
        }
    }
}
