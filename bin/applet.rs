use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod lesson;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Lesson(lesson::Lesson),
    Play(play::Play),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Lesson(a) => Ok(a.execute()?),
            Applet::Play(a) => Ok(a.execute()?),
        }
    }
}
