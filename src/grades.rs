//! Students, their courses, and the grade book that owns them.
//!
//! The grade book owns a [`List`] of students and each student owns a
//! [`List`] of courses. New records are built as transient values and handed
//! to [`List::try_append`], which stores its own deep copy; the transient is
//! then dropped by the caller.
//!
//! Lookups are linear scans. Students are reported in the order they were
//! added, and each student's courses in the order they were graded.

use alloc::string::String;
use core::fmt;
use crate::AllocError;
use crate::List;
use crate::NodeRef;
use crate::TryClone;
use crate::try_copy_str;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE DEFINITIONS                                                    //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A graded course.

#[derive(Debug)]
pub struct Course {
  name: String,
  grade: i32,
}

/// A student and the courses they have been graded in.

#[derive(Debug)]
pub struct Student {
  id: i32,
  name: String,
  courses: List<Course>,
}

/// The grade book: every student, in the order they were added.

#[derive(Debug, Default)]
pub struct Grades {
  students: List<Student>,
}

/// The reasons a grade book operation can be refused.

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GradesError {
  /// The grade was outside `0 ..= 100`.
  GradeOutOfRange(i32),
  /// No student has this id.
  UnknownStudent(i32),
  /// A student with this id already exists.
  DuplicateStudent(i32),
  /// The student with this id already has a grade for the course.
  DuplicateCourse {
    /// The student's id.
    id: i32,
    /// The course that was graded twice.
    name: String,
  },
  /// Memory could not be allocated.
  Alloc(AllocError),
  /// The report could not be written to its destination.
  Write,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// CONSTANTS                                                                  //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// The lowest grade accepted by [`Grades::add_grade`].

pub const MIN_GRADE: i32 = 0;

/// The highest grade accepted by [`Grades::add_grade`].

pub const MAX_GRADE: i32 = 100;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// GradesError                                                                //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl From<AllocError> for GradesError {
  fn from(e: AllocError) -> Self {
    GradesError::Alloc(e)
  }
}

impl fmt::Display for GradesError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GradesError::GradeOutOfRange(grade) =>
        write!(f, "grade {} is not between {} and {}", grade, MIN_GRADE, MAX_GRADE),
      GradesError::UnknownStudent(id) =>
        write!(f, "no student with id {}", id),
      GradesError::DuplicateStudent(id) =>
        write!(f, "a student with id {} already exists", id),
      GradesError::DuplicateCourse { id, name } =>
        write!(f, "student {} already has a grade for {}", id, name),
      GradesError::Alloc(_) =>
        f.write_str("memory allocation failed"),
      GradesError::Write =>
        f.write_str("failed to write the report"),
    }
  }
}

impl core::error::Error for GradesError { }

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Course                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Course {
  /// Creates a course, copying `name`.
  ///
  /// The grade is not range checked here.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_new(name: &str, grade: i32) -> Result<Self, AllocError> {
    let name = try_copy_str(name)?;
    Ok(Self { name, grade })
  }

  /// The course name.

  pub fn name(&self) -> &str {
    &self.name
  }

  /// The grade.

  pub fn grade(&self) -> i32 {
    self.grade
  }
}

impl TryClone for Course {
  fn try_clone(&self) -> Result<Self, AllocError> {
    Ok(Self { name: self.name.try_clone()?, grade: self.grade })
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Student                                                                    //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Student {
  /// Creates a student with no courses, copying `name`.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_new(id: i32, name: &str) -> Result<Self, AllocError> {
    let name = try_copy_str(name)?;
    Ok(Self { id, name, courses: List::new() })
  }

  /// The student's id.

  pub fn id(&self) -> i32 {
    self.id
  }

  /// The student's name.

  pub fn name(&self) -> &str {
    &self.name
  }

  /// The student's courses, in the order they were graded.

  pub fn courses(&self) -> &List<Course> {
    &self.courses
  }

  /// The mean grade over all courses, or `0.0` with no courses.

  pub fn average(&self) -> f32 {
    let mut sum = 0.0_f32;
    let mut count = 0_usize;

    for course in self.courses.iter() {
      sum = sum + course.grade as f32;
      count = count + 1;
    }

    if count == 0 { 0.0 } else { sum / count as f32 }
  }

  fn has_course(&self, name: &str) -> bool {
    self.courses.position(|c| c.name == name).is_some()
  }
}

impl TryClone for Student {
  fn try_clone(&self) -> Result<Self, AllocError> {
    // If the course list fails to copy, the name copy is dropped with it.
    let name = self.name.try_clone()?;
    let courses = self.courses.try_copy()?;
    Ok(Self { id: self.id, name, courses })
  }
}

/// Renders the report line `NAME ID: COURSE GRADE, COURSE GRADE`, without
/// a line break.

impl fmt::Display for Student {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}:", self.name, self.id)?;

    for (i, course) in self.courses.iter().enumerate() {
      if i != 0 {
        f.write_str(",")?;
      }
      write!(f, " {} {}", course.name, course.grade)?;
    }

    Ok(())
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Grades                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Grades {
  /// Creates an empty grade book.

  pub fn new() -> Self {
    Self { students: List::new() }
  }

  /// The number of students.

  pub fn len(&self) -> usize {
    self.students.len()
  }

  /// Whether there are no students.

  pub fn is_empty(&self) -> bool {
    self.students.is_empty()
  }

  /// Every student, in the order they were added.

  pub fn students(&self) -> &List<Student> {
    &self.students
  }

  /// The student with the given id.

  pub fn student(&self, id: i32) -> Option<&Student> {
    self.students.get(self.find(id)?)
  }

  fn find(&self, id: i32) -> Option<NodeRef> {
    self.students.position(|s| s.id == id)
  }

  /// Adds a student with no courses.
  ///
  /// # Errors
  ///
  /// Fails if a student with `id` already exists, or on failure to allocate
  /// memory. The grade book is unchanged on failure.

  pub fn add_student(&mut self, name: &str, id: i32) -> Result<(), GradesError> {
    if self.find(id).is_some() {
      log::debug!("gradebook: rejected duplicate student id {}", id);
      return Err(GradesError::DuplicateStudent(id));
    }

    let student = Student::try_new(id, name)?;
    let _: NodeRef = self.students.try_append(&student)?;

    log::trace!("gradebook: added student {} ({})", id, name);

    Ok(())
  }

  /// Grades the student with `id` in the course `name`.
  ///
  /// # Errors
  ///
  /// Fails if `grade` is not between 0 and 100, if no student has `id`, if
  /// that student already has a grade for `name`, or on failure to allocate
  /// memory. The grade book is unchanged on failure.

  pub fn add_grade(&mut self, name: &str, id: i32, grade: i32) -> Result<(), GradesError> {
    if ! (MIN_GRADE ..= MAX_GRADE).contains(&grade) {
      log::debug!("gradebook: rejected grade {} for student {}", grade, id);
      return Err(GradesError::GradeOutOfRange(grade));
    }

    let Some(node) = self.find(id) else {
      log::debug!("gradebook: no student {} to grade", id);
      return Err(GradesError::UnknownStudent(id));
    };

    let Some(student) = self.students.get_mut(node) else {
      return Err(GradesError::UnknownStudent(id));
    };

    if student.has_course(name) {
      log::debug!("gradebook: student {} already graded in {}", id, name);
      return
        match try_copy_str(name) {
          Ok(name) => Err(GradesError::DuplicateCourse { id, name }),
          Err(e) => Err(e.into()),
        };
    }

    let course = Course::try_new(name, grade)?;
    let _: NodeRef = student.courses.try_append(&course)?;

    log::trace!("gradebook: student {} graded {} in {}", id, grade, name);

    Ok(())
  }

  /// Returns a copy of the student's name together with their mean grade.
  ///
  /// The mean is `0.0` for a student with no courses.
  ///
  /// # Errors
  ///
  /// Fails if no student has `id`, or on failure to allocate the name.

  pub fn calc_avg(&self, id: i32) -> Result<(String, f32), GradesError> {
    let Some(student) = self.student(id) else {
      log::debug!("gradebook: no student {} to average", id);
      return Err(GradesError::UnknownStudent(id));
    };

    Ok((student.name.try_clone()?, student.average()))
  }

  /// Writes the report line for one student, followed by a line break.
  ///
  /// # Errors
  ///
  /// Fails if no student has `id`, or with [`GradesError::Write`] if `out`
  /// refuses the text.

  pub fn write_student<W>(&self, id: i32, out: &mut W) -> Result<(), GradesError>
  where
    W: fmt::Write
  {
    let Some(student) = self.student(id) else {
      log::debug!("gradebook: no student {} to report", id);
      return Err(GradesError::UnknownStudent(id));
    };

    writeln!(out, "{}", student).map_err(|_| GradesError::Write)
  }

  /// Writes the report line for every student, each followed by a line
  /// break.

  pub fn write_all<W>(&self, out: &mut W) -> fmt::Result
  where
    W: fmt::Write
  {
    for student in self.students.iter() {
      writeln!(out, "{}", student)?;
    }

    Ok(())
  }

  /// Prints the report line for one student to standard output.
  ///
  /// # Errors
  ///
  /// Fails if no student has `id`.

  #[cfg(feature = "std")]
  pub fn print_student(&self, id: i32) -> Result<(), GradesError> {
    let mut line = String::new();
    self.write_student(id, &mut line)?;
    std::print!("{}", line);
    Ok(())
  }

  /// Prints the report line for every student to standard output.

  #[cfg(feature = "std")]
  pub fn print_all(&self) {
    let mut report = String::new();
    // Writing into a `String` cannot fail.
    let _: fmt::Result = self.write_all(&mut report);
    std::print!("{}", report);
  }
}
